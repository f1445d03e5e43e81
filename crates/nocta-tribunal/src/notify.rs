//! # Notification Dispatch
//!
//! Fire-and-forget notification hooks invoked when a dossier opens, a
//! council convenes, or a verdict lands. Delivery is the platform's push
//! pipeline; the engine only emits events.
//!
//! A failed dispatch is logged and swallowed — it never rolls back or
//! blocks the engine operation that triggered it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nocta_core::MemberId;

use crate::dossier::DossierId;
use crate::verdict::Verdict;

/// An engine event worth telling a member about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// A dossier was opened naming the member as subject.
    DossierOpened {
        /// The dossier in question.
        dossier_id: DossierId,
    },
    /// A council was convened on a dossier naming the member as subject.
    CouncilConvened {
        /// The dossier in question.
        dossier_id: DossierId,
    },
    /// A dossier naming the member as subject was closed with a verdict.
    DossierClosed {
        /// The dossier in question.
        dossier_id: DossierId,
        /// The recorded verdict.
        verdict: Verdict,
    },
}

/// Errors arising from the notification pipeline.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Delivery to the push pipeline failed.
    #[error("notification dispatch failed: {0}")]
    DispatchFailed(String),
}

/// Contract fulfilled by the platform's notification pipeline.
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver an event to a member. Best-effort; the engine does not
    /// retry.
    fn notify(&self, member: &MemberId, event: NotificationEvent) -> Result<(), NotifyError>;
}

/// Dispatcher that drops every event. Useful in tests and for deployments
/// that wire notifications elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDispatcher;

impl NotificationDispatcher for NullDispatcher {
    fn notify(&self, _member: &MemberId, _event: NotificationEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Dispatch an event, logging and swallowing any failure.
pub(crate) fn notify_quietly(
    dispatcher: &dyn NotificationDispatcher,
    member: &MemberId,
    event: NotificationEvent,
) {
    if let Err(e) = dispatcher.notify(member, event) {
        tracing::warn!(member = %member, error = %e, "notification dispatch failed; continuing");
    }
}
