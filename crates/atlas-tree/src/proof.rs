//! # Inclusion Proofs — Generation and Verification
//!
//! A proof carries everything needed to re-fold a leaf hash up to a
//! target root: per-level sibling digests plus a path bit per pairing
//! step (0 = running digest is the left operand, 1 = the right). One
//! [`ProofSegment`] covers one aggregation group; crossing from region
//! to country to continent to global appends one segment per boundary,
//! so a verifier sees each intermediate root being formed.
//!
//! ## Design
//!
//! Generation walks the pairing layers the builder retained; it performs
//! no hashing itself. A promoted member (odd group, no partner) simply
//! contributes no step, and a segment with zero steps is omitted
//! entirely — a leaf alone at every level proves itself with an empty
//! segment list and `leaf_hash == target_root`.
//!
//! ## Security Invariant
//!
//! Verification is total: every malformed input — length mismatch, a
//! path bit outside {0, 1}, sibling bytes the primitive rejects — is an
//! ordinary `false`, never a panic or an error. A verifier learns
//! nothing about *which* check failed.

use serde::{Deserialize, Serialize};

use atlas_core::digest::{Digest, HashAlgorithm};

use crate::builder::{Tree, GLOBAL_KEY};
use crate::config::{Hierarchy, Level};
use crate::error::TreeError;
use crate::primitive::hasher_for;

/// The sibling path through one aggregation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofSegment {
    /// The level this segment's group belongs to.
    pub level: Level,
    /// Sibling digest per pairing step, bottom layer first.
    pub siblings: Vec<Digest>,
    /// Path bit per pairing step: 0 — running digest is the left
    /// operand, 1 — the right. Parallel to `siblings`.
    pub path_indices: Vec<u8>,
}

/// An inclusion proof from one leaf up to a target root.
///
/// Self-contained: verification needs no access to the tree, only the
/// independently trusted `target_root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// Hash primitive the proof folds under.
    pub algorithm: HashAlgorithm,
    /// The leaf commitment being proven.
    pub leaf_hash: Digest,
    /// The root the fold must reach.
    pub target_root: Digest,
    /// Segments in aggregation order, lowest level first.
    pub segments: Vec<ProofSegment>,
}

/// Generate an inclusion proof for `leaf_id` up to `target`.
///
/// # Errors
///
/// `LeafNotFound` if the id is not in the tree; `InvalidTargetLevel` if
/// the configured hierarchy has no such level (e.g. `Region` on a flat
/// tree).
pub fn generate_proof(tree: &Tree, leaf_id: &str, target: Level) -> Result<Proof, TreeError> {
    let leaf = tree
        .leaf(leaf_id)
        .ok_or_else(|| TreeError::LeafNotFound(leaf_id.to_owned()))?;
    if tree.level(target).is_none() {
        return Err(TreeError::InvalidTargetLevel(target.to_string()));
    }

    // The hop chain child key → group key, bottom-up. Each hop names the
    // group aggregating the previous hop's key.
    let hops: Vec<(Level, String, String)> = match &tree.config().hierarchy {
        Hierarchy::Flat => vec![(Level::Global, GLOBAL_KEY.to_owned(), leaf_id.to_owned())],
        Hierarchy::Geographic { continents } => {
            let region_key = format!("{}/{}", leaf.country, leaf.region);
            let country_key = leaf.country.as_str().to_owned();
            let continent_key = continents.lookup(&leaf.country)?.as_str().to_owned();
            vec![
                (Level::Region, region_key.clone(), leaf_id.to_owned()),
                (Level::Country, country_key.clone(), region_key),
                (Level::Continent, continent_key.clone(), country_key),
                (Level::Global, GLOBAL_KEY.to_owned(), continent_key),
            ]
        }
    };

    let mut segments = Vec::new();
    let mut target_root = leaf.commitment.leaf_hash;
    for (level, group_key, child_key) in hops {
        if level > target {
            break;
        }
        // Both lookups are infallible for a leaf the tree contains; a
        // miss means the tree is not one this builder produced.
        let node = tree
            .level(level)
            .and_then(|l| l.node(&group_key))
            .ok_or_else(|| TreeError::LeafNotFound(leaf_id.to_owned()))?;
        let position = node
            .member_keys()
            .binary_search_by(|key| key.as_str().cmp(&child_key))
            .map_err(|_| TreeError::LeafNotFound(leaf_id.to_owned()))?;

        let (siblings, path_indices) = segment_steps(node.layers(), position);
        if !siblings.is_empty() {
            segments.push(ProofSegment {
                level,
                siblings,
                path_indices,
            });
        }
        target_root = node.root();
    }

    Ok(Proof {
        algorithm: tree.algorithm(),
        leaf_hash: leaf.commitment.leaf_hash,
        target_root,
        segments,
    })
}

/// Collect the sibling path for `position` through `layers`.
///
/// Walks every pairing layer below the root. An even position pairs with
/// its right neighbor (bit 0) when one exists and is promoted without a
/// step otherwise; an odd position pairs with its left neighbor (bit 1).
pub(crate) fn segment_steps(layers: &[Vec<Digest>], mut position: usize) -> (Vec<Digest>, Vec<u8>) {
    let mut siblings = Vec::new();
    let mut path_indices = Vec::new();
    let pairing_layers = match layers.split_last() {
        Some((_root, lower)) => lower,
        None => return (siblings, path_indices),
    };
    for layer in pairing_layers {
        if position % 2 == 0 {
            if let Some(sibling) = layer.get(position + 1) {
                siblings.push(*sibling);
                path_indices.push(0);
            }
            // No right neighbor: this digest is promoted unchanged.
        } else {
            siblings.push(layer[position - 1]);
            path_indices.push(1);
        }
        position /= 2;
    }
    (siblings, path_indices)
}

/// Verify an inclusion proof against its embedded target root.
///
/// Total over arbitrary input: any malformed shape or primitive failure
/// yields `false`.
#[must_use]
pub fn verify_proof(proof: &Proof) -> bool {
    let hasher = hasher_for(proof.algorithm);
    let mut current = proof.leaf_hash;
    for segment in &proof.segments {
        if segment.siblings.len() != segment.path_indices.len() {
            return false;
        }
        for (sibling, index) in segment.siblings.iter().zip(&segment.path_indices) {
            let folded = match index {
                0 => hasher.hash_pair(&current, sibling),
                1 => hasher.hash_pair(sibling, &current),
                _ => return false,
            };
            current = match folded {
                Ok(digest) => digest,
                Err(_) => return false,
            };
        }
    }
    current == proof.target_root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{build_level, level_root};

    fn digest(fill: u8) -> Digest {
        Digest::new([fill; 32])
    }

    fn replay(leaf: Digest, siblings: &[Digest], path_indices: &[u8]) -> Digest {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let mut current = leaf;
        for (sibling, index) in siblings.iter().zip(path_indices) {
            current = match index {
                0 => hasher.hash_pair(&current, sibling).unwrap(),
                _ => hasher.hash_pair(sibling, &current).unwrap(),
            };
        }
        current
    }

    #[test]
    fn test_segment_steps_single_member() {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let layers = build_level(hasher.as_ref(), &[digest(1)]).unwrap();
        let (siblings, path_indices) = segment_steps(&layers, 0);
        assert!(siblings.is_empty());
        assert!(path_indices.is_empty());
    }

    #[test]
    fn test_segment_steps_every_position_reaches_root() {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        for count in 1..=9usize {
            let members: Vec<Digest> = (0..count).map(|i| digest(i as u8 + 1)).collect();
            let layers = build_level(hasher.as_ref(), &members).unwrap();
            let root = level_root(&layers).unwrap();
            for (position, member) in members.iter().enumerate() {
                let (siblings, path_indices) = segment_steps(&layers, position);
                assert_eq!(
                    replay(*member, &siblings, &path_indices),
                    root,
                    "position {position} of {count} members failed to reach the root"
                );
            }
        }
    }

    #[test]
    fn test_promoted_positions_have_shorter_paths() {
        // Five members: position 4 is promoted twice before pairing, so
        // its path has a single step while position 0 has three.
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let members: Vec<Digest> = (1..=5).map(digest).collect();
        let layers = build_level(hasher.as_ref(), &members).unwrap();

        let (siblings, _) = segment_steps(&layers, 0);
        assert_eq!(siblings.len(), 3);
        let (siblings, path_indices) = segment_steps(&layers, 4);
        assert_eq!(siblings.len(), 1);
        assert_eq!(path_indices, [1]);
    }

    #[test]
    fn test_verify_rejects_length_mismatch() {
        let proof = Proof {
            algorithm: HashAlgorithm::Sha256,
            leaf_hash: digest(1),
            target_root: digest(2),
            segments: vec![ProofSegment {
                level: Level::Global,
                siblings: vec![digest(3)],
                path_indices: vec![],
            }],
        };
        assert!(!verify_proof(&proof));
    }

    #[test]
    fn test_verify_rejects_bad_path_bit() {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let leaf = digest(1);
        let sibling = digest(2);
        let root = hasher.hash_pair(&leaf, &sibling).unwrap();
        let mut proof = Proof {
            algorithm: HashAlgorithm::Sha256,
            leaf_hash: leaf,
            target_root: root,
            segments: vec![ProofSegment {
                level: Level::Global,
                siblings: vec![sibling],
                path_indices: vec![0],
            }],
        };
        assert!(verify_proof(&proof));
        proof.segments[0].path_indices[0] = 2;
        assert!(!verify_proof(&proof));
    }

    #[test]
    fn test_verify_zero_segment_proof() {
        let proof = Proof {
            algorithm: HashAlgorithm::Sha256,
            leaf_hash: digest(7),
            target_root: digest(7),
            segments: vec![],
        };
        assert!(verify_proof(&proof));

        let mismatched = Proof {
            target_root: digest(8),
            ..proof
        };
        assert!(!verify_proof(&mismatched));
    }

    #[test]
    fn test_verify_is_order_sensitive() {
        let hasher = hasher_for(HashAlgorithm::Sha256);
        let leaf = digest(1);
        let sibling = digest(2);
        let root = hasher.hash_pair(&leaf, &sibling).unwrap();
        let proof = Proof {
            algorithm: HashAlgorithm::Sha256,
            leaf_hash: leaf,
            target_root: root,
            segments: vec![ProofSegment {
                level: Level::Global,
                siblings: vec![sibling],
                // Claims the leaf was the right operand; it was the left.
                path_indices: vec![1],
            }],
        };
        assert!(!verify_proof(&proof));
    }

    #[test]
    fn test_proof_serde_shape() {
        let proof = Proof {
            algorithm: HashAlgorithm::Sha256,
            leaf_hash: digest(1),
            target_root: digest(2),
            segments: vec![ProofSegment {
                level: Level::Region,
                siblings: vec![digest(3)],
                path_indices: vec![0],
            }],
        };
        let value = serde_json::to_value(&proof).unwrap();
        assert_eq!(value["algorithm"], "sha256");
        assert!(value["leafHash"].is_string());
        assert!(value["targetRoot"].is_string());
        assert_eq!(value["segments"][0]["level"], "region");
        assert!(value["segments"][0]["pathIndices"].is_array());

        let back: Proof = serde_json::from_value(value).unwrap();
        assert_eq!(back, proof);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::aggregate::{build_level, level_root};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_every_sibling_path_replays_to_the_root(
            raw in proptest::collection::vec(any::<[u8; 32]>(), 1..40),
        ) {
            let hasher = hasher_for(HashAlgorithm::Sha256);
            let members: Vec<Digest> = raw.into_iter().map(Digest::new).collect();
            let layers = build_level(hasher.as_ref(), &members).unwrap();
            let root = level_root(&layers).unwrap();

            for (position, member) in members.iter().enumerate() {
                let (siblings, path_indices) = segment_steps(&layers, position);
                prop_assert_eq!(siblings.len(), path_indices.len());

                let mut current = *member;
                for (sibling, index) in siblings.iter().zip(&path_indices) {
                    current = match index {
                        0 => hasher.hash_pair(&current, sibling).unwrap(),
                        _ => hasher.hash_pair(sibling, &current).unwrap(),
                    };
                }
                prop_assert_eq!(current, root);
            }
        }

        #[test]
        fn prop_sibling_count_bounded_by_layer_count(
            raw in proptest::collection::vec(any::<[u8; 32]>(), 1..40),
            position_seed in any::<usize>(),
        ) {
            let hasher = hasher_for(HashAlgorithm::Sha256);
            let members: Vec<Digest> = raw.into_iter().map(Digest::new).collect();
            let layers = build_level(hasher.as_ref(), &members).unwrap();
            let position = position_seed % members.len();

            let (siblings, _) = segment_steps(&layers, position);
            prop_assert!(siblings.len() <= layers.len() - 1);
        }
    }
}
