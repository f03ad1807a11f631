//! # Poseidon Primitive — BN254, circom parameters
//!
//! The arithmetic-circuit-native primitive. Roots produced under this
//! hasher can be opened inside a ZK residency circuit without the cost
//! of bit-decomposing SHA-256.
//!
//! ## Digest Domain
//!
//! A digest under this primitive is the canonical 32-byte big-endian
//! encoding of a BN254 scalar field element. `hash_pair` rejects a
//! 32-byte value at or above the field modulus instead of silently
//! reducing it: two different byte strings must never alias to the same
//! field element.
//!
//! ## Wide Inputs
//!
//! `hash_single` accepts arbitrary byte lengths by splitting into
//! 31-byte big-endian chunks (each strictly below the modulus). A single
//! chunk is hashed with one-input Poseidon; multiple chunks fold
//! sequentially, first chunk as the seed and each following chunk
//! absorbed through the two-input permutation.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonError, PoseidonHasher as _};

use atlas_core::digest::{Digest, HashAlgorithm};

use crate::error::HashError;
use crate::primitive::PairHasher;

/// Bytes per input chunk; 31 bytes = 248 bits, always below the
/// 254-bit BN254 modulus.
const FIELD_CHUNK_BYTES: usize = 31;

/// Poseidon over the BN254 scalar field with circom-compatible
/// parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseidonHasher;

impl PairHasher for PoseidonHasher {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Poseidon
    }

    fn hash_single(&self, bytes: &[u8]) -> Result<Digest, HashError> {
        if bytes.is_empty() {
            return Err(HashError::EmptyInput);
        }
        let mut chunks = bytes.chunks(FIELD_CHUNK_BYTES);
        let Some(first) = chunks.next() else {
            return Err(HashError::EmptyInput);
        };
        let mut acc = Fr::from_be_bytes_mod_order(first);

        let mut rest = chunks.peekable();
        if rest.peek().is_none() {
            let mut poseidon = Poseidon::<Fr>::new_circom(1).map_err(backend_error)?;
            let mixed = poseidon.hash(&[acc]).map_err(backend_error)?;
            return Ok(digest_from_field(&mixed));
        }
        for chunk in rest {
            let absorbed = Fr::from_be_bytes_mod_order(chunk);
            acc = pair_fold(acc, absorbed)?;
        }
        Ok(digest_from_field(&acc))
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest, HashError> {
        let l = field_from_digest(left)?;
        let r = field_from_digest(right)?;
        let folded = pair_fold(l, r)?;
        Ok(digest_from_field(&folded))
    }
}

/// Two-input Poseidon permutation over raw field elements.
fn pair_fold(left: Fr, right: Fr) -> Result<Fr, HashError> {
    let mut poseidon = Poseidon::<Fr>::new_circom(2).map_err(backend_error)?;
    poseidon.hash(&[left, right]).map_err(backend_error)
}

/// Decode a digest as a canonical field element.
///
/// Decode-then-reencode: if the round trip changes the bytes, the input
/// was at or above the modulus and is rejected.
fn field_from_digest(digest: &Digest) -> Result<Fr, HashError> {
    let fe = Fr::from_be_bytes_mod_order(digest.as_bytes());
    let bytes = fe.into_bigint().to_bytes_be();
    if bytes.as_slice() != digest.as_bytes() {
        return Err(HashError::NonCanonicalFieldElement);
    }
    Ok(fe)
}

/// Encode a field element as its canonical 32-byte big-endian digest.
fn digest_from_field(fe: &Fr) -> Digest {
    let bytes = fe.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Digest::new(out)
}

fn backend_error(e: PoseidonError) -> HashError {
    HashError::Poseidon(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A canonical digest whose 32-byte encoding is `0x00 || bytes`,
    /// for building expected values of the chunk fold by hand.
    fn padded_digest(bytes: &[u8]) -> Digest {
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(bytes);
        Digest::new(out)
    }

    #[test]
    fn test_hash_pair_deterministic() {
        let a = PoseidonHasher.hash_single(b"left operand").unwrap();
        let b = PoseidonHasher.hash_single(b"right operand").unwrap();
        assert_eq!(
            PoseidonHasher.hash_pair(&a, &b).unwrap(),
            PoseidonHasher.hash_pair(&a, &b).unwrap()
        );
    }

    #[test]
    fn test_hash_pair_non_commutative() {
        let a = PoseidonHasher.hash_single(b"a").unwrap();
        let b = PoseidonHasher.hash_single(b"b").unwrap();
        assert_ne!(
            PoseidonHasher.hash_pair(&a, &b).unwrap(),
            PoseidonHasher.hash_pair(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_outputs_are_canonical_operands() {
        // Any produced digest must be accepted back as an operand.
        let a = PoseidonHasher.hash_single(b"chain").unwrap();
        let b = PoseidonHasher.hash_pair(&a, &a).unwrap();
        assert!(PoseidonHasher.hash_pair(&b, &a).is_ok());
    }

    #[test]
    fn test_non_canonical_operand_rejected() {
        // 2^256 - 1 is far above the BN254 modulus.
        let bad = Digest::new([0xFF; 32]);
        let good = PoseidonHasher.hash_single(b"x").unwrap();
        assert!(matches!(
            PoseidonHasher.hash_pair(&bad, &good),
            Err(HashError::NonCanonicalFieldElement)
        ));
        assert!(matches!(
            PoseidonHasher.hash_pair(&good, &bad),
            Err(HashError::NonCanonicalFieldElement)
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            PoseidonHasher.hash_single(b""),
            Err(HashError::EmptyInput)
        ));
    }

    #[test]
    fn test_two_chunk_fold_matches_manual_pair() {
        // 40 bytes: chunk 0 = first 31 bytes (seed), chunk 1 = last 9.
        let input: Vec<u8> = (0u8..40).map(|i| i + 1).collect();
        let folded = PoseidonHasher.hash_single(&input).unwrap();

        let seed = padded_digest(&input[..31]);
        let tail = padded_digest(&input[31..]);
        let expected = PoseidonHasher.hash_pair(&seed, &tail).unwrap();
        assert_eq!(folded, expected);
    }

    #[test]
    fn test_three_chunk_fold_matches_manual_pairs() {
        // 70 bytes: 31 + 31 + 8.
        let input: Vec<u8> = (0u8..70).map(|i| i.wrapping_mul(3).wrapping_add(7)).collect();
        let folded = PoseidonHasher.hash_single(&input).unwrap();

        let seed = padded_digest(&input[..31]);
        let second = padded_digest(&input[31..62]);
        let third = padded_digest(&input[62..]);
        let mut acc = PoseidonHasher.hash_pair(&seed, &second).unwrap();
        acc = PoseidonHasher.hash_pair(&acc, &third).unwrap();
        assert_eq!(folded, acc);
    }

    #[test]
    fn test_single_chunk_is_mixed_not_raw() {
        // One-chunk hashing must apply the permutation, not return the
        // embedded chunk bytes.
        let input: Vec<u8> = (1u8..=31).collect();
        let digest = PoseidonHasher.hash_single(&input).unwrap();
        assert_ne!(digest, padded_digest(&input));
    }

    #[test]
    fn test_chunk_boundary_sensitivity() {
        let short: Vec<u8> = (1u8..=31).collect();
        let mut long = short.clone();
        long.push(0xAA);
        assert_ne!(
            PoseidonHasher.hash_single(&short).unwrap(),
            PoseidonHasher.hash_single(&long).unwrap()
        );
    }

    #[test]
    fn test_scalar_embedding_is_canonical_operand() {
        let level = PoseidonHasher.digest_from_u64(5);
        let other = PoseidonHasher.hash_single(b"operand").unwrap();
        assert!(PoseidonHasher.hash_pair(&other, &level).is_ok());
    }
}
