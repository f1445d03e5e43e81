//! # Identity Newtypes
//!
//! Newtypes for member and community identifiers. A member identifies an
//! account on the platform; a community identifies the city chapter that
//! scopes events, councils, and dossiers.
//!
//! ## Validation
//!
//! [`CommunityId`] is validated to be non-empty at construction time and at
//! deserialization time. [`MemberId`] is UUID-based and always valid by
//! construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A unique identifier for a member account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Create a new random member identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a member identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MemberId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

// -- Validating Deserialize for CommunityId -----------------------------------

impl<'de> Deserialize<'de> for CommunityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A community identifier, naming the city chapter a member belongs to
/// (e.g., "lisboa", "berlin-mitte").
///
/// # Validation
///
/// Must be a non-empty string. No further format restrictions are imposed
/// because chapter naming varies across markets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CommunityId(String);

impl CommunityId {
    /// Create a community identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCommunityId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidCommunityId);
        }
        Ok(Self(trimmed))
    }

    /// Access the community identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommunityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
