//! # Hash Primitive Seam
//!
//! `PairHasher` is the narrow interface between the tree machinery and
//! the hash primitives. Everything above it (leaf builder, aggregator,
//! proof verifier) is primitive-agnostic; everything below it
//! ([`crate::sha256`], [`crate::poseidon`]) knows nothing about trees.
//!
//! ## Security Invariant
//!
//! `hash_pair` must be non-commutative for unequal operands. The proof
//! path bits record which side the running digest sits on; a commutative
//! pair hash would let a verifier accept sibling-swapped paths.

use atlas_core::digest::{Digest, HashAlgorithm};

use crate::error::HashError;
use crate::poseidon::PoseidonHasher;
use crate::sha256::Sha256Hasher;

/// A pair/single hashing primitive the tree is built under.
///
/// One primitive is fixed per tree as explicit configuration; the
/// algorithms never mix within a tree, a snapshot, or a proof.
pub trait PairHasher: Send + Sync {
    /// The algorithm tag this primitive implements.
    fn algorithm(&self) -> HashAlgorithm;

    /// Hash a byte sequence into a digest.
    ///
    /// # Errors
    ///
    /// `HashError::EmptyInput` for empty input, uniformly across
    /// primitives.
    fn hash_single(&self, bytes: &[u8]) -> Result<Digest, HashError>;

    /// Hash an ordered digest pair into a parent digest.
    ///
    /// Order-sensitive: `hash_pair(a, b)` and `hash_pair(b, a)` differ
    /// for `a != b`.
    ///
    /// # Errors
    ///
    /// `HashError::NonCanonicalFieldElement` if an operand is not valid
    /// under the primitive's digest domain.
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest, HashError>;

    /// Embed a small scalar as a canonical 32-byte big-endian digest.
    ///
    /// Used for the authority-level operand of leaf commitments. The
    /// encoding is primitive-independent: any `u64` is far below the
    /// BN254 modulus, so the same bytes are canonical under both
    /// algorithms.
    fn digest_from_u64(&self, value: u64) -> Digest {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Digest::new(bytes)
    }
}

/// Construct the primitive for an algorithm tag.
///
/// The sole construction path: callers hold a `HashAlgorithm` from tree
/// configuration and never instantiate hashers directly.
pub fn hasher_for(algorithm: HashAlgorithm) -> Box<dyn PairHasher> {
    match algorithm {
        HashAlgorithm::Sha256 => Box::new(Sha256Hasher),
        HashAlgorithm::Poseidon => Box::new(PoseidonHasher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_for_dispatch() {
        assert_eq!(
            hasher_for(HashAlgorithm::Sha256).algorithm(),
            HashAlgorithm::Sha256
        );
        assert_eq!(
            hasher_for(HashAlgorithm::Poseidon).algorithm(),
            HashAlgorithm::Poseidon
        );
    }

    #[test]
    fn test_scalar_embedding_is_primitive_independent() {
        let sha = hasher_for(HashAlgorithm::Sha256);
        let poseidon = hasher_for(HashAlgorithm::Poseidon);
        for value in [0u64, 1, 5, u64::MAX] {
            assert_eq!(sha.digest_from_u64(value), poseidon.digest_from_u64(value));
        }
    }

    #[test]
    fn test_scalar_embedding_big_endian() {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let digest = hasher.digest_from_u64(3);
        let mut expected = [0u8; 32];
        expected[31] = 3;
        assert_eq!(digest.as_bytes(), &expected);
    }

    #[test]
    fn test_empty_input_rejected_by_both() {
        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Poseidon] {
            let hasher = hasher_for(algorithm);
            assert!(
                matches!(hasher.hash_single(b""), Err(HashError::EmptyInput)),
                "{algorithm} accepted empty input"
            );
        }
    }
}
