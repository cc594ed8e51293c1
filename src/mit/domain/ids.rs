//! Identifier types for the MIT domain.

use super::MitDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a persisted MIT record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MitId(Uuid);

impl MitId {
    /// Creates a new random MIT identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MIT identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses an identifier from its canonical string form.
    ///
    /// # Errors
    ///
    /// Returns [`MitDomainError::InvalidId`] when the value is not a UUID.
    pub fn parse(value: &str) -> Result<Self, MitDomainError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| MitDomainError::InvalidId(value.to_owned()))
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MitId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for MitId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
