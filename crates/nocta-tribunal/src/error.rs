//! # Tribunal Error Types
//!
//! Structured error hierarchy for the adjudication engine. Every variant
//! carries enough context for callers to render a precise message —
//! several of these (`AlreadyVoted`, `DossierClosed`) are expected,
//! recoverable conditions rather than bugs, and must stay distinguishable
//! from generic storage failures.

use thiserror::Error;

/// Errors arising from adjudication operations.
#[derive(Error, Debug)]
pub enum TribunalError {
    /// A member attempted to report themselves.
    #[error("reporter {member_id} cannot open a dossier against themselves")]
    InvalidSubject {
        /// The offending member identifier.
        member_id: String,
    },

    /// The dossier description was empty or whitespace-only.
    #[error("dossier description must not be empty")]
    EmptyDescription,

    /// A council was convened with no eligible roles.
    #[error("cannot convene a council with an empty role set")]
    EmptyJurisdiction,

    /// Attempted state transition is not valid from the current status.
    #[error("invalid dossier transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The current status name.
        from: String,
        /// The attempted target status name.
        to: String,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// The dossier is closed; its verdict is final and no further
    /// mutation is accepted.
    #[error("dossier {dossier_id} is closed; the verdict is final")]
    DossierClosed {
        /// The dossier identifier.
        dossier_id: String,
    },

    /// No dossier exists with the given identifier.
    #[error("no dossier found with id {dossier_id}")]
    DossierNotFound {
        /// The unknown dossier identifier.
        dossier_id: String,
    },

    /// The member may not vote on (or close) this dossier.
    #[error("member {member_id} is not eligible: {reason}")]
    NotEligible {
        /// The member identifier.
        member_id: String,
        /// Why eligibility failed.
        reason: String,
    },

    /// The voter already cast a ballot on this dossier.
    #[error("member {voter_id} already voted on dossier {dossier_id}")]
    AlreadyVoted {
        /// The dossier identifier.
        dossier_id: String,
        /// The voter identifier.
        voter_id: String,
    },

    /// An underlying persistence operation failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<nocta_ledger::LedgerError> for TribunalError {
    fn from(err: nocta_ledger::LedgerError) -> Self {
        Self::Storage(err.to_string())
    }
}
