//! # Snapshot Export
//!
//! A versioned, serializable summary of one built tree: a fresh
//! [`SnapshotId`] and build timestamp around the deterministic payload
//! (algorithm, depth, leaf count, global root, and every group root per
//! level). Downstream issuance systems pin the global root from a
//! snapshot; auditors diff group roots between snapshots to localize
//! what changed.
//!
//! The envelope is intentionally not the tree: it carries no layers and
//! no leaf hashes, so it cannot generate proofs. Proof generation needs
//! the tree (or a rebuild from the records, which is bit-identical).

use serde::{Deserialize, Serialize};

use atlas_core::digest::{Digest, HashAlgorithm};
use atlas_core::identity::SnapshotId;
use atlas_core::temporal::Timestamp;

use crate::builder::Tree;
use crate::config::Level;

/// One aggregation group inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    /// The group key.
    pub key: String,
    /// The group's root digest.
    pub root: Digest,
    /// Number of direct members.
    pub member_count: usize,
}

/// All groups of one level, sorted by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    /// The level tag.
    pub level: Level,
    /// Groups in key order.
    pub groups: Vec<GroupSnapshot>,
}

/// The exported summary of one tree build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSnapshot {
    /// Unique id of this snapshot.
    pub snapshot_id: SnapshotId,
    /// When the snapshot was taken (UTC, seconds precision).
    pub built_at: Timestamp,
    /// The hash primitive the tree was built with.
    pub algorithm: HashAlgorithm,
    /// Number of aggregation levels.
    pub depth: usize,
    /// Total number of leaves.
    pub leaf_count: usize,
    /// The single root committing to every record.
    pub global_root: Digest,
    /// Per-level group roots, bottom-up.
    pub levels: Vec<LevelSnapshot>,
}

impl Tree {
    /// Export a snapshot of this tree.
    ///
    /// The envelope (id, timestamp) is fresh per call; the payload is a
    /// pure function of the tree, so two snapshots of the same tree
    /// differ only in their envelopes.
    pub fn snapshot(&self) -> TreeSnapshot {
        let levels = self
            .levels()
            .iter()
            .map(|level| LevelSnapshot {
                level: level.level(),
                groups: level
                    .nodes()
                    .iter()
                    .map(|node| GroupSnapshot {
                        key: node.key().to_owned(),
                        root: node.root(),
                        member_count: node.member_count(),
                    })
                    .collect(),
            })
            .collect();

        TreeSnapshot {
            snapshot_id: SnapshotId::new(),
            built_at: Timestamp::now(),
            algorithm: self.algorithm(),
            depth: self.hierarchy_depth(),
            leaf_count: self.leaf_count(),
            global_root: self.global_root(),
            levels,
        }
    }
}
