//! # Tribunal Engine
//!
//! Shared, concurrently-accessed adjudication service. Owns the dossier,
//! ballot, and proof stores and coordinates the injected collaborators:
//! the role directory, the evidence store, the restriction ledger, and the
//! notification dispatcher.
//!
//! ## Locking Discipline
//!
//! Every mutating operation on a dossier runs while holding that dossier's
//! `DashMap` entry guard. `cast_vote` holds it across the eligibility
//! check, the uniqueness check, and the ballot insert; `resolve` holds it
//! across read-tally-restrict-close. Two concurrent `resolve` calls
//! therefore cannot both win, and a ballot racing a closure either lands
//! in the tally or fails — it is never silently dropped or applied after
//! closure. Ballot and proof map entries are only ever touched while the
//! owning dossier's guard is held, so lock acquisition order is uniform.

use std::collections::BTreeSet;
use std::sync::Arc;

use dashmap::DashMap;

use nocta_core::{CommunityId, MemberId, Role, RoleDirectory, Timestamp};
use nocta_ledger::RestrictionLedger;

use crate::dossier::{DossierId, DossierStatus, IncidenceDossier};
use crate::eligibility::check_eligibility;
use crate::error::TribunalError;
use crate::evidence::{EvidenceProof, EvidenceStore, ProofId, ProofKind};
use crate::notify::{notify_quietly, NotificationDispatcher, NotificationEvent};
use crate::policy::{LateVotePolicy, TribunalPolicy};
use crate::verdict::{Verdict, VoteTally};
use crate::vote::CouncilVote;

/// The adjudication engine.
///
/// Cheap to share behind an `Arc`; all operations take `&self`.
pub struct TribunalEngine {
    dossiers: DashMap<DossierId, IncidenceDossier>,
    votes: DashMap<DossierId, Vec<CouncilVote>>,
    proofs: DashMap<DossierId, Vec<EvidenceProof>>,
    directory: Arc<dyn RoleDirectory>,
    evidence: Arc<dyn EvidenceStore>,
    ledger: Arc<dyn RestrictionLedger>,
    notifier: Arc<dyn NotificationDispatcher>,
    policy: TribunalPolicy,
}

impl TribunalEngine {
    /// Create an engine with the default [`TribunalPolicy`].
    pub fn new(
        directory: Arc<dyn RoleDirectory>,
        evidence: Arc<dyn EvidenceStore>,
        ledger: Arc<dyn RestrictionLedger>,
        notifier: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self::with_policy(directory, evidence, ledger, notifier, TribunalPolicy::default())
    }

    /// Create an engine with an explicit policy.
    pub fn with_policy(
        directory: Arc<dyn RoleDirectory>,
        evidence: Arc<dyn EvidenceStore>,
        ledger: Arc<dyn RestrictionLedger>,
        notifier: Arc<dyn NotificationDispatcher>,
        policy: TribunalPolicy,
    ) -> Self {
        Self {
            dossiers: DashMap::new(),
            votes: DashMap::new(),
            proofs: DashMap::new(),
            directory,
            evidence,
            ledger,
            notifier,
            policy,
        }
    }

    // ── Dossier lifecycle ──────────────────────────────────────────────

    /// Open a misconduct dossier against a member.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::InvalidSubject`] if reporter and subject match.
    /// - [`TribunalError::EmptyDescription`] if the rationale is blank.
    pub fn open_dossier(
        &self,
        community_id: CommunityId,
        reporter_id: MemberId,
        subject_id: MemberId,
        description: impl Into<String>,
    ) -> Result<IncidenceDossier, TribunalError> {
        let dossier = IncidenceDossier::open(community_id, reporter_id, subject_id, description)?;
        let dossier_id = dossier.id;
        let subject = dossier.subject_id;
        self.dossiers.insert(dossier_id, dossier.clone());

        notify_quietly(
            self.notifier.as_ref(),
            &subject,
            NotificationEvent::DossierOpened { dossier_id },
        );
        Ok(dossier)
    }

    /// Attach a proof artifact to a dossier.
    ///
    /// The bytes go to the evidence store; the engine persists only the
    /// returned reference.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::DossierNotFound`] for an unknown dossier.
    /// - [`TribunalError::DossierClosed`] once the dossier is closed.
    /// - [`TribunalError::Storage`] if the evidence store rejects the blob.
    pub fn attach_proof(
        &self,
        dossier_id: DossierId,
        submitted_by: MemberId,
        bytes: &[u8],
        kind: ProofKind,
    ) -> Result<EvidenceProof, TribunalError> {
        let entry = self.dossiers.get_mut(&dossier_id).ok_or_else(|| {
            TribunalError::DossierNotFound {
                dossier_id: dossier_id.to_string(),
            }
        })?;
        if entry.status.is_terminal() {
            return Err(TribunalError::DossierClosed {
                dossier_id: dossier_id.to_string(),
            });
        }

        let file_ref = self
            .evidence
            .store(bytes, kind)
            .map_err(|e| TribunalError::Storage(e.to_string()))?;

        let proof = EvidenceProof {
            id: ProofId::new(),
            dossier_id,
            file_ref,
            kind,
            submitted_by,
            created_at: Timestamp::now(),
        };
        self.proofs.entry(dossier_id).or_default().push(proof.clone());
        Ok(proof)
    }

    /// Convene the council on a dossier: Open → Voting.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::DossierNotFound`] for an unknown dossier.
    /// - [`TribunalError::EmptyJurisdiction`] if `roles` is empty.
    /// - [`TribunalError::DossierClosed`] / [`TribunalError::InvalidTransition`]
    ///   outside Open status.
    pub fn convene(
        &self,
        dossier_id: DossierId,
        roles: BTreeSet<Role>,
        deadline_hours: u32,
    ) -> Result<IncidenceDossier, TribunalError> {
        let mut entry = self.dossiers.get_mut(&dossier_id).ok_or_else(|| {
            TribunalError::DossierNotFound {
                dossier_id: dossier_id.to_string(),
            }
        })?;
        entry.convene(roles, deadline_hours)?;
        let snapshot = entry.clone();
        drop(entry);

        notify_quietly(
            self.notifier.as_ref(),
            &snapshot.subject_id,
            NotificationEvent::CouncilConvened { dossier_id },
        );
        Ok(snapshot)
    }

    /// Dossiers in a community still collecting reports or ballots.
    pub fn list_active(&self, community_id: &CommunityId) -> Vec<IncidenceDossier> {
        self.list_by(community_id, |status| {
            matches!(status, DossierStatus::Open | DossierStatus::Voting)
        })
    }

    /// Closed dossiers in a community. Read-only history; nothing reachable
    /// from this view can mutate a record.
    pub fn list_history(&self, community_id: &CommunityId) -> Vec<IncidenceDossier> {
        self.list_by(community_id, |status| status == DossierStatus::Closed)
    }

    /// Fetch a dossier snapshot by id.
    pub fn get_dossier(&self, dossier_id: &DossierId) -> Option<IncidenceDossier> {
        self.dossiers.get(dossier_id).map(|d| d.value().clone())
    }

    /// Proof records attached to a dossier.
    pub fn proofs(&self, dossier_id: &DossierId) -> Vec<EvidenceProof> {
        self.proofs
            .get(dossier_id)
            .map(|p| p.value().clone())
            .unwrap_or_default()
    }

    fn list_by(
        &self,
        community_id: &CommunityId,
        keep: impl Fn(DossierStatus) -> bool,
    ) -> Vec<IncidenceDossier> {
        let mut matching: Vec<IncidenceDossier> = self
            .dossiers
            .iter()
            .filter(|d| &d.community_id == community_id && keep(d.status))
            .map(|d| d.value().clone())
            .collect();
        matching.sort_by_key(|d| d.created_at);
        matching
    }

    // ── Voting ─────────────────────────────────────────────────────────

    /// Cast one weighted ballot on a dossier.
    ///
    /// The ballot weight is derived from the voter's role via the
    /// directory. `weight_hint` is advisory client state and is ignored —
    /// a voter cannot self-assign influence.
    ///
    /// # Errors
    ///
    /// - [`TribunalError::DossierNotFound`] for an unknown dossier.
    /// - [`TribunalError::DossierClosed`] once the dossier is closed.
    /// - [`TribunalError::NotEligible`] if the voter is the subject, holds
    ///   no convened role, or the dossier is not collecting ballots.
    /// - [`TribunalError::AlreadyVoted`] on a second ballot from the same
    ///   voter; exactly one of any set of concurrent duplicates succeeds.
    pub fn cast_vote(
        &self,
        dossier_id: DossierId,
        voter_id: MemberId,
        choice: Verdict,
        weight_hint: Option<u32>,
    ) -> Result<CouncilVote, TribunalError> {
        // The exclusive guard serializes this ballot against any
        // concurrent resolve() on the same dossier.
        let entry = self.dossiers.get_mut(&dossier_id).ok_or_else(|| {
            TribunalError::DossierNotFound {
                dossier_id: dossier_id.to_string(),
            }
        })?;
        if entry.status.is_terminal() {
            return Err(TribunalError::DossierClosed {
                dossier_id: dossier_id.to_string(),
            });
        }

        let role = check_eligibility(&voter_id, self.directory.role_of(&voter_id), entry.value())
            .map_err(|reason| TribunalError::NotEligible {
                member_id: voter_id.to_string(),
                reason: reason.to_string(),
            })?;

        if self.policy.late_votes == LateVotePolicy::RejectAfterDeadline
            && entry.deadline_elapsed(Timestamp::now())
        {
            return Err(TribunalError::NotEligible {
                member_id: voter_id.to_string(),
                reason: "voting deadline has elapsed".to_string(),
            });
        }

        let weight = self.directory.weight_of(role);
        if let Some(hint) = weight_hint {
            if hint != weight {
                tracing::debug!(
                    voter = %voter_id,
                    hint,
                    authoritative = weight,
                    "ignoring caller-supplied weight hint"
                );
            }
        }

        let mut ballots = self.votes.entry(dossier_id).or_default();
        if ballots.iter().any(|v| v.voter_id == voter_id) {
            return Err(TribunalError::AlreadyVoted {
                dossier_id: dossier_id.to_string(),
                voter_id: voter_id.to_string(),
            });
        }
        let vote = CouncilVote::cast(dossier_id, voter_id, choice, weight);
        ballots.push(vote.clone());
        Ok(vote)
    }

    // ── Resolution ─────────────────────────────────────────────────────

    /// Tally the ballots, record the verdict, and cascade the restriction:
    /// Voting → Closed.
    ///
    /// Before the voting deadline elapses only an early-close role (by
    /// default the chapter principal) may resolve; afterwards any actor —
    /// typically the scheduled closer — may. The restriction write happens
    /// *before* the dossier is marked closed; if it fails, the dossier
    /// stays in Voting and the call reports [`TribunalError::Storage`].
    ///
    /// # Errors
    ///
    /// - [`TribunalError::DossierNotFound`] for an unknown dossier.
    /// - [`TribunalError::DossierClosed`] if already resolved — the stored
    ///   verdict is never re-tallied.
    /// - [`TribunalError::InvalidTransition`] from Open, or when a
    ///   configured quorum is not met.
    /// - [`TribunalError::NotEligible`] for an unauthorized early closure.
    /// - [`TribunalError::Storage`] if the restriction write fails.
    pub fn resolve(
        &self,
        dossier_id: DossierId,
        acting_id: MemberId,
    ) -> Result<Verdict, TribunalError> {
        let mut entry = self.dossiers.get_mut(&dossier_id).ok_or_else(|| {
            TribunalError::DossierNotFound {
                dossier_id: dossier_id.to_string(),
            }
        })?;
        let dossier = entry.value_mut();

        match dossier.status {
            DossierStatus::Closed => {
                return Err(TribunalError::DossierClosed {
                    dossier_id: dossier_id.to_string(),
                })
            }
            DossierStatus::Open => {
                return Err(TribunalError::InvalidTransition {
                    from: DossierStatus::Open.as_str().to_string(),
                    to: DossierStatus::Closed.as_str().to_string(),
                    reason: "a council must be convened before resolution".to_string(),
                })
            }
            DossierStatus::Voting => {}
        }

        if !dossier.deadline_elapsed(Timestamp::now())
            && !self.policy.may_close_early(self.directory.role_of(&acting_id))
        {
            return Err(TribunalError::NotEligible {
                member_id: acting_id.to_string(),
                reason: "only an authorized role may resolve before the deadline".to_string(),
            });
        }

        let mut tally = VoteTally::new();
        let ballot_count = match self.votes.get(&dossier_id) {
            Some(ballots) => {
                for vote in ballots.iter() {
                    tally.record(vote.choice, vote.weight);
                }
                ballots.len()
            }
            None => 0,
        };

        if let Some(min) = self.policy.min_votes {
            if (ballot_count as u32) < min.get() {
                return Err(TribunalError::InvalidTransition {
                    from: DossierStatus::Voting.as_str().to_string(),
                    to: DossierStatus::Closed.as_str().to_string(),
                    reason: format!(
                        "quorum not met: {ballot_count} of {min} required ballots"
                    ),
                });
            }
        }

        let verdict = tally.decide();

        // Restriction cascade precedes closure: a ledger failure must not
        // leave a closed dossier with an unapplied punishment.
        if verdict.requires_restriction() {
            let note = format!("{verdict}: {}", dossier.description);
            self.ledger.apply_restriction(&dossier.subject_id, &note)?;
        }

        dossier.close(verdict, acting_id)?;
        tracing::info!(
            dossier = %dossier_id,
            verdict = %verdict,
            ballots = ballot_count,
            "dossier resolved"
        );

        let subject = dossier.subject_id;
        drop(entry);
        notify_quietly(
            self.notifier.as_ref(),
            &subject,
            NotificationEvent::DossierClosed { dossier_id, verdict },
        );
        Ok(verdict)
    }
}

impl std::fmt::Debug for TribunalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TribunalEngine")
            .field("dossier_count", &self.dossiers.len())
            .field("policy", &self.policy)
            .finish()
    }
}
