//! # nocta-tribunal — Incidence Adjudication Engine
//!
//! Implements the ethics tribunal for the Nocta platform:
//!
//! - **Dossier** (`dossier.rs`): misconduct dossier lifecycle state
//!   machine — `Open → Voting → Closed` with an append-only transition
//!   log.
//!
//! - **Evidence** (`evidence.rs`): proof artifacts attached to a dossier,
//!   persisted through the opaque [`EvidenceStore`] adapter.
//!
//! - **Eligibility** (`eligibility.rs`): the pure predicate deciding who
//!   may vote on a given dossier.
//!
//! - **Vote** (`vote.rs`): one immutable weighted ballot per eligible
//!   voter per dossier.
//!
//! - **Verdict** (`verdict.rs`): the verdict enum and the deterministic
//!   weighted tally (default-innocent, lenient tie-break).
//!
//! - **Engine** (`engine.rs`): the shared service coordinating the above
//!   with the injected role directory, restriction ledger, and
//!   notification dispatcher.
//!
//! ## Crate Policy
//!
//! - Depends on `nocta-core` and `nocta-ledger` internally.
//! - The restriction cascade is the engine's only write into the wider
//!   platform; everything else the platform learns from this crate comes
//!   from reading dossier snapshots.
//! - Ballot stores never leak another voter's choice through any public
//!   operation.

pub mod directory;
pub mod dossier;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod notify;
pub mod policy;
pub mod verdict;
pub mod vote;

pub use directory::InMemoryRoleDirectory;
pub use dossier::{DossierId, DossierStatus, IncidenceDossier, TransitionRecord};
pub use engine::TribunalEngine;
pub use error::TribunalError;
pub use evidence::{
    EvidenceProof, EvidenceStore, EvidenceStoreError, FileRef, InMemoryEvidenceStore, ProofId,
    ProofKind,
};
pub use notify::{NotificationDispatcher, NotificationEvent, NotifyError, NullDispatcher};
pub use policy::{LateVotePolicy, TribunalPolicy};
pub use verdict::{tally_verdict, Verdict, VoteTally};
pub use vote::{CouncilVote, VoteId};
