//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers that circulate through the
//! commitment pipeline. You cannot pass a snapshot id where a boundary
//! id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BoundaryError;

/// Stable unique identifier of a governance boundary, e.g.
/// `us-ca-cd-12`. Assigned by the upstream dataset; globally unique
/// across the whole record set.
///
/// Ordering is lexicographic on the raw string. Leaf ordering inside
/// every aggregation group derives from it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundaryId(String);

impl BoundaryId {
    /// Validate and wrap a boundary id.
    pub fn new(id: &str) -> Result<Self, BoundaryError> {
        if id.is_empty() {
            Err(BoundaryError::InvalidBoundaryId)
        } else {
            Ok(Self(id.to_owned()))
        }
    }

    /// Access the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BoundaryId {
    type Error = BoundaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() {
            Err(BoundaryError::InvalidBoundaryId)
        } else {
            Ok(Self(s))
        }
    }
}

impl From<BoundaryId> for String {
    fn from(id: BoundaryId) -> String {
        id.0
    }
}

/// Unique identifier for one emitted tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    /// Generate a new random snapshot identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "snapshot:{}", self.0)
    }
}
