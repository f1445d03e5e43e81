//! # Dossier Lifecycle
//!
//! Manages misconduct dossier creation and lifecycle stages through the
//! state machine: `Open → Voting → Closed`.
//!
//! ## Design Choice: Validated Enum over Typestate
//!
//! This module uses a validated enum (runtime-checked) rather than a
//! typestate encoding. Dossiers are stored in shared maps and serialized
//! across the API boundary, where the status is not known at compile time;
//! a validated enum serializes directly via serde, and each transition has
//! a dedicated method that rejects invalid source states with
//! [`TribunalError::InvalidTransition`].
//!
//! ## Transition Graph
//!
//! ```text
//! Open ──convene()──▶ Voting ──close()──▶ Closed
//! ```
//!
//! Closed is terminal. No transition re-enters Open or Voting, and every
//! attempted mutation of a closed dossier fails with
//! [`TribunalError::DossierClosed`] — a recorded verdict is final.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nocta_core::{CommunityId, MemberId, Role, Timestamp};

use crate::error::TribunalError;
use crate::verdict::Verdict;

// ── Identifiers ────────────────────────────────────────────────────────

/// A unique identifier for a misconduct dossier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DossierId(Uuid);

impl DossierId {
    /// Create a new random dossier identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a dossier identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DossierId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DossierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dossier:{}", self.0)
    }
}

// ── Dossier Status ─────────────────────────────────────────────────────

/// The lifecycle status of a dossier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DossierStatus {
    /// Dossier has been opened by a reporter; evidence may be attached.
    Open,
    /// A council has been convened and ballots are being collected.
    Voting,
    /// A verdict has been recorded. Terminal state.
    Closed,
}

impl DossierStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Voting => "VOTING",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [DossierStatus] {
        match self {
            Self::Open => &[Self::Voting],
            Self::Voting => &[Self::Closed],
            Self::Closed => &[],
        }
    }
}

impl std::fmt::Display for DossierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Transition Record ──────────────────────────────────────────────────

/// A record of a single status transition in the dossier lifecycle.
///
/// The log is append-only; together the records form the audit trail of
/// who moved the dossier and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Status before the transition.
    pub from_status: DossierStatus,
    /// Status after the transition.
    pub to_status: DossierStatus,
    /// The member who initiated the transition, where known.
    pub actor: Option<MemberId>,
    /// When the transition occurred (UTC).
    pub timestamp: DateTime<Utc>,
}

// ── The Dossier ────────────────────────────────────────────────────────

/// A misconduct dossier against a member, scoped to a community chapter.
///
/// Created via [`IncidenceDossier::open`], advanced with
/// [`convene`](IncidenceDossier::convene) and
/// [`close`](IncidenceDossier::close). The convened role set and voting
/// deadline are assigned when the council is convened; the final verdict
/// only when the dossier closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidenceDossier {
    /// Unique dossier identifier.
    pub id: DossierId,
    /// The community chapter the case is confined to.
    pub community_id: CommunityId,
    /// The member who opened the dossier.
    pub reporter_id: MemberId,
    /// The member the dossier is against.
    pub subject_id: MemberId,
    /// Free-text rationale for the report.
    pub description: String,
    /// Current lifecycle status.
    pub status: DossierStatus,
    /// Role tags eligible to vote; assigned when the council is convened.
    pub convened_roles: BTreeSet<Role>,
    /// Advisory voting deadline; assigned when the council is convened.
    pub voting_deadline: Option<Timestamp>,
    /// The adjudicated outcome; assigned when the dossier closes.
    pub final_verdict: Option<Verdict>,
    /// When the dossier was opened (UTC).
    pub created_at: Timestamp,
    /// When the dossier closed (UTC).
    pub closed_at: Option<Timestamp>,
    /// Complete transition history for audit purposes.
    pub transition_log: Vec<TransitionRecord>,
}

impl IncidenceDossier {
    /// Open a new dossier, creating it in [`Open`](DossierStatus::Open).
    ///
    /// This is the only constructor. Validation happens before any record
    /// exists: a rejected call creates nothing.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::InvalidSubject`] if the reporter and subject are
    ///   the same member.
    /// - [`TribunalError::EmptyDescription`] if the description is blank.
    pub fn open(
        community_id: CommunityId,
        reporter_id: MemberId,
        subject_id: MemberId,
        description: impl Into<String>,
    ) -> Result<Self, TribunalError> {
        if reporter_id == subject_id {
            return Err(TribunalError::InvalidSubject {
                member_id: reporter_id.to_string(),
            });
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TribunalError::EmptyDescription);
        }

        let now = Timestamp::now();
        Ok(Self {
            id: DossierId::new(),
            community_id,
            reporter_id,
            subject_id,
            description,
            status: DossierStatus::Open,
            convened_roles: BTreeSet::new(),
            voting_deadline: None,
            final_verdict: None,
            created_at: now,
            closed_at: None,
            transition_log: vec![TransitionRecord {
                from_status: DossierStatus::Open,
                to_status: DossierStatus::Open,
                actor: Some(reporter_id),
                timestamp: Utc::now(),
            }],
        })
    }

    /// Convene the council: transition Open → Voting.
    ///
    /// Assigns the convened role set and a voting deadline `deadline_hours`
    /// from now. Happens exactly once per dossier.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::EmptyJurisdiction`] if `roles` is empty.
    /// - [`TribunalError::DossierClosed`] if the dossier is closed.
    /// - [`TribunalError::InvalidTransition`] if not in Open status.
    pub fn convene(
        &mut self,
        roles: BTreeSet<Role>,
        deadline_hours: u32,
    ) -> Result<(), TribunalError> {
        if roles.is_empty() {
            return Err(TribunalError::EmptyJurisdiction);
        }
        self.require_status(DossierStatus::Open, DossierStatus::Voting)?;

        self.convened_roles = roles;
        self.voting_deadline = Some(Timestamp::now().add_hours(deadline_hours));
        self.record_transition(DossierStatus::Open, DossierStatus::Voting, None);
        self.status = DossierStatus::Voting;
        Ok(())
    }

    /// Record the verdict and close: transition Voting → Closed.
    ///
    /// Callers apply the restriction cascade *before* invoking this — once
    /// a dossier is closed its verdict is final and will not be re-tallied.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::DossierClosed`] if already closed.
    /// - [`TribunalError::InvalidTransition`] if not in Voting status.
    pub fn close(&mut self, verdict: Verdict, acting: MemberId) -> Result<(), TribunalError> {
        self.require_status(DossierStatus::Voting, DossierStatus::Closed)?;

        self.final_verdict = Some(verdict);
        self.closed_at = Some(Timestamp::now());
        self.record_transition(DossierStatus::Voting, DossierStatus::Closed, Some(acting));
        self.status = DossierStatus::Closed;
        Ok(())
    }

    /// Whether the voting deadline has elapsed relative to `now`.
    ///
    /// Returns `false` while no deadline is assigned. The deadline is
    /// advisory metadata for closers — it does not by itself reject votes.
    pub fn deadline_elapsed(&self, now: Timestamp) -> bool {
        self.voting_deadline.map(|d| now > d).unwrap_or(false)
    }

    /// Check that the dossier is in the expected status for a transition.
    fn require_status(
        &self,
        expected: DossierStatus,
        target: DossierStatus,
    ) -> Result<(), TribunalError> {
        if self.status.is_terminal() {
            return Err(TribunalError::DossierClosed {
                dossier_id: self.id.to_string(),
            });
        }
        if self.status != expected {
            return Err(TribunalError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: format!("expected status {}, got {}", expected, self.status),
            });
        }
        Ok(())
    }

    /// Record a transition in the audit log.
    fn record_transition(
        &mut self,
        from: DossierStatus,
        to: DossierStatus,
        actor: Option<MemberId>,
    ) {
        self.transition_log.push(TransitionRecord {
            from_status: from,
            to_status: to,
            actor,
            timestamp: Utc::now(),
        });
    }
}
