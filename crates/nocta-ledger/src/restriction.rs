//! # Restriction Records & Ledger Contract
//!
//! A restriction is the platform-wide trust flag applied to a member found
//! guilty of suspension- or ban-level misconduct. The record is keyed by
//! member identity and carries a note composed of the verdict and the
//! originating dossier description.
//!
//! Writes are blind overwrites — the resolver is the only legitimate
//! writer for a given member at a given time, so last-writer-wins is
//! acceptable and no read-modify-write cycle exists. Lifting a
//! restriction is an administrative action outside this crate; no clearing
//! operation is exposed.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nocta_core::{MemberId, Timestamp};

/// Errors arising from restriction ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A gated action was denied because the member is restricted.
    #[error("member {member_id} is restricted: {action} denied")]
    ActionRestricted {
        /// The restricted member.
        member_id: String,
        /// The action that was denied.
        action: String,
    },

    /// The underlying record store failed.
    #[error("restriction store failure: {0}")]
    Backend(String),
}

/// The restriction state of a single member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRecord {
    /// Whether the member is currently restricted platform-wide.
    pub is_restricted: bool,
    /// Verdict and originating description, for operator forensics.
    pub notes: String,
    /// When the restriction was applied.
    pub applied_at: Timestamp,
}

/// Storage contract for the restriction ledger.
///
/// The verdict resolver receives this as an injected collaborator; gating
/// consumers (ticketing, RSVP, messaging) use only the read side.
/// Implementations must be safe to share across threads and must provide
/// read-after-write consistency on the member key.
pub trait RestrictionLedger: Send + Sync {
    /// Apply a restriction to a member, overwriting any previous note.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Backend`] if the record cannot be persisted.
    /// Callers treat that as a failure of the whole resolution, not a
    /// partial success.
    fn apply_restriction(&self, member: &MemberId, note: &str) -> Result<(), LedgerError>;

    /// Whether the member is currently restricted.
    fn is_restricted(&self, member: &MemberId) -> bool;

    /// The member's full restriction record, if one exists.
    fn record_of(&self, member: &MemberId) -> Option<RestrictionRecord>;
}

/// In-memory restriction ledger backed by `DashMap`.
///
/// Cheaply cloneable — all clones share the same records. Reads are
/// lock-free per shard, which is what the high-frequency gating callers
/// need; writes are rare (one per guilty verdict).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRestrictionLedger {
    records: std::sync::Arc<DashMap<MemberId, RestrictionRecord>>,
}

impl InMemoryRestrictionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members with a restriction record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RestrictionLedger for InMemoryRestrictionLedger {
    fn apply_restriction(&self, member: &MemberId, note: &str) -> Result<(), LedgerError> {
        self.records.insert(
            *member,
            RestrictionRecord {
                is_restricted: true,
                notes: note.to_string(),
                applied_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    fn is_restricted(&self, member: &MemberId) -> bool {
        self.records
            .get(member)
            .map(|r| r.is_restricted)
            .unwrap_or(false)
    }

    fn record_of(&self, member: &MemberId) -> Option<RestrictionRecord> {
        self.records.get(member).map(|r| r.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_member_is_unrestricted() {
        let ledger = InMemoryRestrictionLedger::new();
        assert!(!ledger.is_restricted(&MemberId::new()));
        assert!(ledger.record_of(&MemberId::new()).is_none());
    }

    #[test]
    fn apply_sets_flag_and_note() {
        let ledger = InMemoryRestrictionLedger::new();
        let member = MemberId::new();
        ledger
            .apply_restriction(&member, "ban: threatened door staff")
            .unwrap();

        assert!(ledger.is_restricted(&member));
        let record = ledger.record_of(&member).unwrap();
        assert!(record.is_restricted);
        assert_eq!(record.notes, "ban: threatened door staff");
    }

    #[test]
    fn apply_overwrites_previous_note() {
        let ledger = InMemoryRestrictionLedger::new();
        let member = MemberId::new();
        ledger.apply_restriction(&member, "suspension: first case").unwrap();
        ledger.apply_restriction(&member, "ban: second case").unwrap();

        let record = ledger.record_of(&member).unwrap();
        assert_eq!(record.notes, "ban: second case");
        assert!(record.is_restricted);
    }

    #[test]
    fn clones_share_records() {
        let ledger = InMemoryRestrictionLedger::new();
        let reader = ledger.clone();
        let member = MemberId::new();
        ledger.apply_restriction(&member, "suspension: note").unwrap();
        assert!(reader.is_restricted(&member));
    }

    #[test]
    fn restrictions_are_per_member() {
        let ledger = InMemoryRestrictionLedger::new();
        let guilty = MemberId::new();
        let bystander = MemberId::new();
        ledger.apply_restriction(&guilty, "ban: note").unwrap();

        assert!(ledger.is_restricted(&guilty));
        assert!(!ledger.is_restricted(&bystander));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = RestrictionRecord {
            is_restricted: true,
            notes: "suspension: scalped allocations".to_string(),
            applied_at: Timestamp::parse("2026-08-06T23:00:00Z").unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let deser: RestrictionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deser);
    }
}
