//! # Level Aggregation
//!
//! Folds an ordered digest list bottom-up into a root, retaining every
//! intermediate layer for proof generation.
//!
//! ## Odd-Node Policy
//!
//! An odd trailing digest is promoted to the next layer unchanged —
//! never duplicated, never hashed against itself. The policy holds at
//! every layer of every level, so a proof path step at a promoted
//! position contributes no sibling.

use atlas_core::digest::Digest;

use crate::error::TreeError;
use crate::primitive::PairHasher;

/// Aggregate an ordered member list into pairing layers.
///
/// Layer 0 is the input; each following layer hashes adjacent pairs of
/// the one below and promotes an odd trailing digest; the last layer is
/// the singleton root.
///
/// A single member aggregates to itself: the result is one layer and
/// zero pairing steps.
///
/// # Errors
///
/// `TreeError::EmptyLevel` for an empty member list; any primitive
/// failure propagates.
pub fn build_level(
    hasher: &dyn PairHasher,
    members: &[Digest],
) -> Result<Vec<Vec<Digest>>, TreeError> {
    if members.is_empty() {
        return Err(TreeError::EmptyLevel);
    }
    let mut layers = vec![members.to_vec()];
    while layers[layers.len() - 1].len() > 1 {
        let current = &layers[layers.len() - 1];
        let mut next = Vec::with_capacity(current.len() / 2 + 1);
        let mut pairs = current.chunks_exact(2);
        for pair in pairs.by_ref() {
            next.push(hasher.hash_pair(&pair[0], &pair[1])?);
        }
        if let [promoted] = pairs.remainder() {
            next.push(*promoted);
        }
        layers.push(next);
    }
    Ok(layers)
}

/// The root of a layer stack produced by [`build_level`].
pub fn level_root(layers: &[Vec<Digest>]) -> Result<Digest, TreeError> {
    layers
        .last()
        .and_then(|layer| layer.first())
        .copied()
        .ok_or(TreeError::EmptyLevel)
}
