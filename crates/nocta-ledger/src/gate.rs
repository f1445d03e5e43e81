//! # Gating Surface
//!
//! The read-side check the rest of the platform issues before serving a
//! member. Ticketing calls it before a purchase, events before an RSVP or
//! door check-in, messaging before a send. The tribunal has no outbound
//! dependency on any of those subsystems — they come to the ledger.

use nocta_core::MemberId;

use crate::restriction::{LedgerError, RestrictionLedger};

/// A member action gated on the restriction ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    /// Buying a ticket from event inventory.
    TicketPurchase,
    /// RSVPing to a guest-list event.
    Rsvp,
    /// Checking in at the door.
    CheckIn,
    /// Sending a direct message to another member.
    DirectMessage,
}

impl GatedAction {
    /// All gated actions as a slice.
    pub fn all() -> &'static [GatedAction] {
        &[
            Self::TicketPurchase,
            Self::Rsvp,
            Self::CheckIn,
            Self::DirectMessage,
        ]
    }

    /// The canonical string tag for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TicketPurchase => "ticket_purchase",
            Self::Rsvp => "rsvp",
            Self::CheckIn => "check_in",
            Self::DirectMessage => "direct_message",
        }
    }
}

impl std::fmt::Display for GatedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a member may perform a gated action.
///
/// # Errors
///
/// Returns [`LedgerError::ActionRestricted`] if the member is currently
/// restricted. Callers map this to their own "account restricted" surface;
/// it is an expected condition, not a bug.
pub fn ensure_unrestricted(
    ledger: &dyn RestrictionLedger,
    member: &MemberId,
    action: GatedAction,
) -> Result<(), LedgerError> {
    if ledger.is_restricted(member) {
        return Err(LedgerError::ActionRestricted {
            member_id: member.to_string(),
            action: action.as_str().to_string(),
        });
    }
    Ok(())
}
