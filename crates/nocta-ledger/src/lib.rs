//! # nocta-ledger — Platform Restriction Ledger
//!
//! The enforcement sink of the tribunal and the gate the rest of the
//! platform checks before serving a member:
//!
//! - **Restriction** (`restriction.rs`): per-member restriction records,
//!   the [`RestrictionLedger`] storage contract, and the in-memory
//!   backend.
//!
//! - **Gate** (`gate.rs`): the read-side helper ticketing, RSVP, check-in,
//!   and messaging call before allowing a member action.
//!
//! ## Crate Policy
//!
//! - Writes come only from the tribunal's verdict resolver; this crate
//!   exposes no operation that clears a restriction.
//! - Reads are lock-free and safe to issue at request frequency.

pub mod gate;
pub mod restriction;

pub use gate::{ensure_unrestricted, GatedAction};
pub use restriction::{InMemoryRestrictionLedger, LedgerError, RestrictionLedger, RestrictionRecord};
