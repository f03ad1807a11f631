//! # SHA-256 Primitive
//!
//! The operational-default primitive. Pair hashing digests the 64-byte
//! concatenation `left || right`; concatenation order is exactly the
//! operand order, which is what makes the pair hash non-commutative.

use sha2::{Digest as _, Sha256};

use atlas_core::digest::{Digest, HashAlgorithm};

use crate::error::HashError;
use crate::primitive::PairHasher;

/// SHA-256 over raw bytes and ordered digest pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PairHasher for Sha256Hasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn hash_single(&self, bytes: &[u8]) -> Result<Digest, HashError> {
        if bytes.is_empty() {
            return Err(HashError::EmptyInput);
        }
        Ok(sha256(bytes))
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest, HashError> {
        let mut input = [0u8; 64];
        input[..32].copy_from_slice(left.as_bytes());
        input[32..].copy_from_slice(right.as_bytes());
        Ok(sha256(&input))
    }
}

fn sha256(bytes: &[u8]) -> Digest {
    let hash = Sha256::digest(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    Digest::new(out)
}
