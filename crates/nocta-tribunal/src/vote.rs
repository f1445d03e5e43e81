//! # Council Ballots
//!
//! The ballot record produced when an eligible council member votes on a
//! dossier. Ballots are created once and never mutated; at most one exists
//! per `(dossier, voter)` pair, enforced at insertion under the dossier's
//! store lock rather than by any prior read.
//!
//! A ballot is returned only to the voter who cast it. The resolver reads
//! ballots solely to build aggregate sums — no public operation exposes
//! another voter's choice.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nocta_core::{MemberId, Timestamp};

use crate::dossier::DossierId;
use crate::verdict::Verdict;

/// A unique identifier for a council ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteId(Uuid);

impl VoteId {
    /// Create a new random ballot identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a ballot identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vote:{}", self.0)
    }
}

/// A single weighted ballot on a dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilVote {
    /// Unique ballot identifier.
    pub id: VoteId,
    /// The dossier voted on.
    pub dossier_id: DossierId,
    /// The member who cast the ballot.
    pub voter_id: MemberId,
    /// The verdict the ballot is for.
    pub choice: Verdict,
    /// The weight the ballot carries, derived from the voter's role by the
    /// directory — never from caller input.
    pub weight: u32,
    /// When the ballot was cast (UTC).
    pub created_at: Timestamp,
}

impl CouncilVote {
    /// Record a new ballot.
    pub fn cast(dossier_id: DossierId, voter_id: MemberId, choice: Verdict, weight: u32) -> Self {
        Self {
            id: VoteId::new(),
            dossier_id,
            voter_id,
            choice,
            weight,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_records_choice_and_weight() {
        let dossier = DossierId::new();
        let voter = MemberId::new();
        let vote = CouncilVote::cast(dossier, voter, Verdict::Suspension, 3);

        assert_eq!(vote.dossier_id, dossier);
        assert_eq!(vote.voter_id, voter);
        assert_eq!(vote.choice, Verdict::Suspension);
        assert_eq!(vote.weight, 3);
    }

    #[test]
    fn vote_id_display() {
        let id = VoteId::new();
        assert!(format!("{id}").starts_with("vote:"));
    }

    #[test]
    fn vote_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = VoteId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn vote_serde_roundtrip() {
        let vote = CouncilVote::cast(DossierId::new(), MemberId::new(), Verdict::Ban, 1);
        let json = serde_json::to_string(&vote).unwrap();
        let deser: CouncilVote = serde_json::from_str(&json).unwrap();
        assert_eq!(vote, deser);
    }
}
