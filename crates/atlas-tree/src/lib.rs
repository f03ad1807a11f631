//! # atlas-tree — Hierarchical Commitment Trees
//!
//! The commitment-tree engine of the Atlas stack:
//!
//! - **Hash primitives** behind one [`PairHasher`] seam: SHA-256 for
//!   cheap audit trees, Poseidon over BN254 for trees whose proofs feed
//!   arithmetic circuits.
//! - **Leaf commitments** binding each boundary record's type, id,
//!   canonical geometry, and authority level.
//! - **Aggregation** with the promote-unchanged odd-node rule, leaf to
//!   region to country to continent to global (or flat).
//! - **Inclusion proofs** to any level of the hierarchy, verified with
//!   nothing but the proof and a trusted root.
//! - **Incremental updates** under an append-only, existing-entry-wins
//!   policy, and **snapshot export** for downstream root pinning.
//!
//! ## Crate Policy
//!
//! - Depends only on `atlas-core` internally.
//! - No mocking of hash primitives in tests — every test folds real
//!   SHA-256 or real Poseidon.
//! - `unsafe` prohibited without `// SAFETY:` justification.

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod error;
pub mod leaf;
pub mod poseidon;
pub mod primitive;
pub mod proof;
pub mod sha256;
pub mod snapshot;
pub mod update;

pub use builder::{AggregationNode, LeafEntry, Tree, TreeLevel};
pub use config::{Hierarchy, Level, TreeConfig};
pub use error::{HashError, TreeError};
pub use leaf::{build_leaf, LeafCommitment};
pub use poseidon::PoseidonHasher;
pub use primitive::{hasher_for, PairHasher};
pub use proof::{generate_proof, verify_proof, Proof, ProofSegment};
pub use sha256::Sha256Hasher;
pub use snapshot::{GroupSnapshot, LevelSnapshot, TreeSnapshot};
pub use update::{incremental_update, TreeUpdate};
