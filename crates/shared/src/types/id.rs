//! Object identifiers.
//!
//! An [`ObjectId`] is a random UUID v4. It is both the blob-store key and the
//! reference handed back to clients, so its string form is always the
//! canonical hyphenated lowercase rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Length of the hyphenated `8-4-4-4-12` rendering.
const HYPHENATED_LEN: usize = 36;

/// Rejected identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed object identifier: {0:?}")]
pub struct IdParseError(pub String);

/// Unique identifier for a stored object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Creates a new random ID using UUID v4 (OS-backed randomness).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parses the hyphenated `8-4-4-4-12` form.
    ///
    /// Hex digits may be upper or lower case and any version/variant bits are
    /// accepted. The simple, braced, and URN renderings that `Uuid::parse_str`
    /// also understands are rejected.
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        if s.len() != HYPHENATED_LEN {
            return Err(IdParseError(s.to_string()));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| IdParseError(s.to_string()))
    }

    /// Storage key for this object.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
