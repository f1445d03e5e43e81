//! # Tribunal Policy
//!
//! Deployment-tunable knobs for the behaviors the engine deliberately does
//! not hardcode: late-ballot handling, a minimum-participation gate, and
//! who may close a case early. The defaults reproduce the platform's
//! shipped behavior; changing them never alters the state machine or the
//! tally rules.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use nocta_core::Role;

/// How to treat a ballot arriving after the voting deadline but before
/// the dossier is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateVotePolicy {
    /// Accept the ballot; eligibility is defined by the dossier still
    /// collecting ballots, not by deadline comparison. The default.
    Accept,
    /// Reject the ballot as ineligible once the deadline has elapsed.
    RejectAfterDeadline,
}

/// Configuration applied by the engine's resolver and voting paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TribunalPolicy {
    /// Handling of ballots cast after the deadline.
    pub late_votes: LateVotePolicy,
    /// Minimum number of ballots required before a dossier may be
    /// resolved. `None` imposes no quorum.
    pub min_votes: Option<NonZeroU32>,
    /// Roles allowed to resolve a dossier before its deadline elapses.
    /// After the deadline, any actor may resolve.
    pub early_close_roles: BTreeSet<Role>,
}

impl Default for TribunalPolicy {
    fn default() -> Self {
        Self {
            late_votes: LateVotePolicy::Accept,
            min_votes: None,
            early_close_roles: [Role::Principal].into_iter().collect(),
        }
    }
}

impl TribunalPolicy {
    /// Whether the role may close a dossier whose deadline has not elapsed.
    pub fn may_close_early(&self, role: Option<Role>) -> bool {
        role.map(|r| self.early_close_roles.contains(&r))
            .unwrap_or(false)
    }
}
