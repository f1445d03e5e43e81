//! # Core Validation Errors
//!
//! Errors raised by validated constructors in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors arising from invalid construction of core types.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Community identifier was empty or whitespace-only.
    #[error("community identifier must be a non-empty string")]
    InvalidCommunityId,

    /// Timestamp string was not valid UTC ISO8601.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Role tag string did not name a known role.
    #[error("unknown role tag: \"{0}\"")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_community_id_display() {
        let err = ValidationError::InvalidCommunityId;
        assert!(format!("{err}").contains("non-empty"));
    }

    #[test]
    fn unknown_role_display() {
        let err = ValidationError::UnknownRole("dj".to_string());
        assert!(format!("{err}").contains("dj"));
    }
}
