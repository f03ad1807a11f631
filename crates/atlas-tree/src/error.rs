//! # Tree Engine Errors
//!
//! Error types for hash primitives and tree construction. Constructive
//! operations (leaf building, aggregation, proof generation) fail loudly
//! with typed errors; proof *verification* never surfaces these — an
//! invalid proof is an ordinary `false`.

use thiserror::Error;

use atlas_core::error::{BoundaryError, GeometryError};
use atlas_core::identity::BoundaryId;

/// Error inside a hash primitive.
#[derive(Error, Debug)]
pub enum HashError {
    /// Hashing an empty byte sequence.
    ///
    /// Rejected uniformly by every primitive so that a record hashes or
    /// fails identically under both algorithms.
    #[error("cannot hash an empty byte sequence")]
    EmptyInput,

    /// A 32-byte value is not a canonical BN254 field element.
    #[error("digest is not a canonical field element")]
    NonCanonicalFieldElement,

    /// The Poseidon backend reported a failure.
    #[error("poseidon hashing failed: {0}")]
    Poseidon(String),
}

/// Error during tree construction, update, or proof generation.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Aggregating an empty member list.
    #[error("cannot aggregate an empty level")]
    EmptyLevel,

    /// Building a tree from an empty record set.
    #[error("cannot build a tree from an empty record set")]
    EmptyInput,

    /// Two records share an id.
    #[error("duplicate boundary id: {0}")]
    DuplicateId(BoundaryId),

    /// Proof requested for an id that is not in the tree.
    #[error("leaf not found: {0:?}")]
    LeafNotFound(String),

    /// Proof requested against a level the configured hierarchy does not
    /// contain.
    #[error("invalid target level {0:?}: not present in the configured hierarchy")]
    InvalidTargetLevel(String),

    /// Geometry validation or canonicalization failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Boundary-record or jurisdiction validation failed.
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    /// A hash primitive failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}
