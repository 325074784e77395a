use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for a codespace record (UUID v4).
///
/// Identifiers are minted from 122 bits of randomness and are never checked
/// against the store for collisions; the probability of a duplicate over the
/// lifetime of a table is negligible. The canonical text form is the
/// lowercase hyphenated UUID, which is also the store key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodespaceId(uuid::Uuid);

impl CodespaceId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for CodespaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for CodespaceId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidId {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for CodespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodespaceId({})", self.short_id())
    }
}

impl fmt::Display for CodespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
