//! # In-Memory Role Directory
//!
//! `DashMap`-backed implementation of the [`RoleDirectory`] contract for
//! tests and single-node deployments. Production wires the hosted identity
//! service behind the same trait.

use dashmap::DashMap;

use nocta_core::{MemberId, Role, RoleDirectory, RoleWeights};

/// In-memory member-to-role assignments with a configurable weight table.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    roles: DashMap<MemberId, Role>,
    weights: RoleWeights,
}

impl InMemoryRoleDirectory {
    /// Create an empty directory with the platform default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directory with an explicit weight table.
    pub fn with_weights(weights: RoleWeights) -> Self {
        Self {
            roles: DashMap::new(),
            weights,
        }
    }

    /// Assign (or reassign) a member's role.
    pub fn assign(&self, member: MemberId, role: Role) {
        self.roles.insert(member, role);
    }

    /// Remove a member's role assignment.
    pub fn revoke(&self, member: &MemberId) {
        self.roles.remove(member);
    }
}

impl RoleDirectory for InMemoryRoleDirectory {
    fn role_of(&self, member: &MemberId) -> Option<Role> {
        self.roles.get(member).map(|r| *r.value())
    }

    fn weight_of(&self, role: Role) -> u32 {
        self.weights.weight_of(role)
    }
}
