//! # nocta-core — Foundational Types for the Nocta Platform
//!
//! This crate is the bedrock of the Nocta membership platform. It defines
//! the type-system primitives shared by every other crate in the workspace;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `MemberId`, `CommunityId` —
//!    newtypes with validated constructors. No bare strings or UUIDs for
//!    identifiers.
//!
//! 2. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision. Non-UTC inputs are rejected at
//!    construction, never silently converted.
//!
//! 3. **Role weights live in the directory.** The engine never hardcodes a
//!    role's voting weight; the [`RoleDirectory`] collaborator owns both the
//!    member-to-role mapping and the [`RoleWeights`] table, so communities
//!    can evolve weights without touching adjudication logic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nocta-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod digest;
pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{sha256_digest, ContentDigest};
pub use error::ValidationError;
pub use identity::{CommunityId, MemberId};
pub use role::{Role, RoleDirectory, RoleWeights};
pub use temporal::Timestamp;
