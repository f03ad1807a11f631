//! # Digests and Hash Algorithm Tags
//!
//! Defines `Digest`, the uniform 32-byte hash value used throughout the
//! commitment tree, and `HashAlgorithm`, the closed set of primitives a
//! tree can be built under.
//!
//! ## Security Invariant
//!
//! Every tree, snapshot, and proof carries a `HashAlgorithm` tag so that
//! artifacts produced under different primitives can never be confused.
//! A BN254 field element fits canonically in 32 big-endian bytes, so both
//! supported primitives share one digest width.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, DigestError};

/// The hash primitive a commitment tree is built under.
///
/// Chosen once per tree as explicit configuration and recorded in every
/// snapshot and proof. The two primitives never mix within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    /// SHA-256 — operational default, cheap to compute anywhere.
    Sha256,
    /// Poseidon over the BN254 scalar field — arithmetic-circuit-native,
    /// for roots consumed inside ZK residency circuits.
    Poseidon,
}

impl HashAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Poseidon => "poseidon",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "poseidon" => Ok(Self::Poseidon),
            other => Err(ConfigError::UnknownHashPrimitive(other.to_string())),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HashAlgorithm> for String {
    fn from(algorithm: HashAlgorithm) -> String {
        algorithm.as_str().to_owned()
    }
}

/// A 32-byte hash value.
///
/// Serializes as a 64-character lowercase hex string on every wire
/// surface (snapshots, proofs). Ordering is byte-lexicographic, used
/// only for deterministic iteration in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from a 64-character hex string (either case).
    ///
    /// # Errors
    ///
    /// Returns `DigestError::InvalidLength` for any other length and
    /// `DigestError::InvalidCharacter` for non-hex input.
    pub fn from_hex(s: &str) -> Result<Self, DigestError> {
        if s.len() != 64 {
            return Err(DigestError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; 32];
        for (i, pair) in s.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_nibble(pair[0]).ok_or(DigestError::InvalidCharacter(i * 2))?;
            let lo = hex_nibble(pair[1]).ok_or(DigestError::InvalidCharacter(i * 2 + 1))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
