//! # Voting Eligibility
//!
//! The pure predicate deciding who may vote on a dossier. A member is
//! eligible iff their role intersects the convened role set, they are not
//! the subject of the case, and the dossier is collecting ballots.
//!
//! This module holds no state of its own — the role comes from the
//! directory, the rest from the dossier.

use nocta_core::{MemberId, Role};

use crate::dossier::{DossierStatus, IncidenceDossier};

/// Whether a member with the given role may vote on the dossier.
pub fn is_eligible(voter: &MemberId, role: Option<Role>, dossier: &IncidenceDossier) -> bool {
    check_eligibility(voter, role, dossier).is_ok()
}

/// Eligibility check with a reason on rejection.
///
/// Returns the voter's role on success so callers can derive the ballot
/// weight without a second directory lookup. The reason strings surface
/// verbatim in [`TribunalError::NotEligible`](crate::TribunalError::NotEligible).
pub fn check_eligibility(
    voter: &MemberId,
    role: Option<Role>,
    dossier: &IncidenceDossier,
) -> Result<Role, &'static str> {
    if dossier.status != DossierStatus::Voting {
        return Err("dossier is not collecting ballots");
    }
    if voter == &dossier.subject_id {
        return Err("the subject of a dossier cannot vote on their own case");
    }
    let role = role.ok_or("member holds no role in the directory")?;
    if !dossier.convened_roles.contains(&role) {
        return Err("role is not part of the convened council");
    }
    Ok(role)
}
