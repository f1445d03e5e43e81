//! # Role Model & Directory Contract
//!
//! Defines the community role hierarchy and the contract the platform's
//! identity service fulfills toward the adjudication engine.
//!
//! A member holds at most one role per chapter. Council votes are weighted
//! by role: the owner tier carries more influence over a chapter's internal
//! justice outcomes because it bears more operational accountability for
//! the chapter, bounded so that a single heavier vote cannot unilaterally
//! decide a contested verdict.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::MemberId;

/// A member's role within their community chapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    /// Regular member of the chapter.
    Member,
    /// Promotes events and brings in guests.
    Promoter,
    /// Hosts events at partner venues.
    Host,
    /// Owner tier: runs the chapter.
    Principal,
}

impl Role {
    /// All roles as a slice.
    pub fn all() -> &'static [Role] {
        &[Self::Member, Self::Promoter, Self::Host, Self::Principal]
    }

    /// The canonical string tag for serialization and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Promoter => "promoter",
            Self::Host => "host",
            Self::Principal => "principal",
        }
    }

    /// Parse a role from its canonical string tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownRole`] for unrecognized tags.
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        match tag {
            "member" => Ok(Self::Member),
            "promoter" => Ok(Self::Promoter),
            "host" => Ok(Self::Host),
            "principal" => Ok(Self::Principal),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role-to-weight lookup table used when tallying council votes.
///
/// Owned by the directory, not the engine, so a community can evolve its
/// weights without touching adjudication logic. Weights are always positive;
/// a role missing from the table falls back to weight 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWeights {
    weights: BTreeMap<Role, u32>,
}

impl RoleWeights {
    /// Build a weight table from explicit entries. Zero weights are bumped
    /// to 1 — a ballot can never count for nothing.
    pub fn new(entries: impl IntoIterator<Item = (Role, u32)>) -> Self {
        let weights = entries
            .into_iter()
            .map(|(role, w)| (role, w.max(1)))
            .collect();
        Self { weights }
    }

    /// Look up the weight a role's ballot carries.
    pub fn weight_of(&self, role: Role) -> u32 {
        self.weights.get(&role).copied().unwrap_or(1)
    }
}

impl Default for RoleWeights {
    /// The platform default: the owner tier carries weight 3, every other
    /// role weight 1.
    fn default() -> Self {
        Self::new([(Role::Principal, 3)])
    }
}

/// Contract fulfilled by the platform's identity/role service.
///
/// The adjudication engine consults the directory for eligibility checks
/// and for the authoritative ballot weight. Implementations must be safe
/// to share across threads.
pub trait RoleDirectory: Send + Sync {
    /// The role the member currently holds, if any.
    fn role_of(&self, member: &MemberId) -> Option<Role>;

    /// The ballot weight the role carries. Authoritative — caller-supplied
    /// weight hints are never trusted over this value.
    fn weight_of(&self, role: Role) -> u32;
}
