//! # Leaf Commitments
//!
//! Binds one boundary record into a single digest. The fold hashes each
//! identity-bearing field separately before combining, so the commitment
//! binds the fields independently:
//!
//! ```text
//! t  = hash_single(boundary type tag)
//! i  = hash_single(id)
//! g  = hash_single(canonical geometry)
//! leaf = hash_pair(hash_pair(hash_pair(t, i), g), scalar(authority))
//! ```
//!
//! Moving bytes between fields cannot preserve the commitment: each
//! operand is already a fixed-width digest when it enters the fold, and
//! the pair hash is order-sensitive.

use serde::{Deserialize, Serialize};

use atlas_core::boundary::{AuthorityLevel, BoundaryRecord, BoundaryType};
use atlas_core::canonical::CanonicalGeometry;
use atlas_core::digest::Digest;
use atlas_core::identity::BoundaryId;

use crate::error::TreeError;
use crate::primitive::PairHasher;

/// The commitment for one boundary record.
///
/// A pure function of the record under a fixed primitive; never mutated
/// after construction. `geometry_digest` is retained so auditors can
/// check which geometry bytes a leaf binds without re-canonicalizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafCommitment {
    /// The record's stable id.
    pub id: BoundaryId,
    /// The record's boundary type.
    pub boundary_type: BoundaryType,
    /// Digest of the canonical geometry encoding.
    pub geometry_digest: Digest,
    /// The record's authority ordinal.
    pub authority_level: AuthorityLevel,
    /// The leaf digest entering aggregation.
    pub leaf_hash: Digest,
}

/// Build the leaf commitment for a record.
///
/// # Errors
///
/// Propagates geometry validation/canonicalization failures and any
/// primitive failure. A record that fails here contributes nothing to
/// the tree; the caller aborts the whole build.
pub fn build_leaf(
    hasher: &dyn PairHasher,
    record: &BoundaryRecord,
) -> Result<LeafCommitment, TreeError> {
    let type_digest = hasher.hash_single(record.boundary_type.as_str().as_bytes())?;
    let id_digest = hasher.hash_single(record.id.as_str().as_bytes())?;

    let canonical = CanonicalGeometry::new(&record.geometry)?;
    let geometry_digest = hasher.hash_single(canonical.as_bytes())?;

    let authority = hasher.digest_from_u64(u64::from(record.authority_level.get()));

    let mut acc = hasher.hash_pair(&type_digest, &id_digest)?;
    acc = hasher.hash_pair(&acc, &geometry_digest)?;
    let leaf_hash = hasher.hash_pair(&acc, &authority)?;

    Ok(LeafCommitment {
        id: record.id.clone(),
        boundary_type: record.boundary_type,
        geometry_digest,
        authority_level: record.authority_level,
        leaf_hash,
    })
}
