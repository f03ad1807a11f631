//! # Tree Builder — Leaves to Global Root
//!
//! Assembles the full hierarchy from boundary records: leaf commitments,
//! grouped aggregation per level, and the single global root. Builds are
//! deterministic — every grouping axis and every member list is sorted
//! lexicographically before any hashing, so any permutation of the same
//! records produces bit-identical roots.
//!
//! ## Design
//!
//! Every aggregation node retains its full pairing structure
//! ([`AggregationNode::layers`]), not just its root. Proof generation
//! walks those layers directly; recomputing them per proof would re-hash
//! the whole group each time.
//!
//! Group keys form a uniform child-to-parent chain: a leaf id is a
//! member key of its `"CC/RR"` region node, the qualified region key is
//! a member key of its `"CC"` country node, the country code of its
//! continent node, and the continent tag of the single `"global"` node.
//! Proof generation relies on member keys naming the child group
//! exactly.

use std::collections::BTreeMap;

use atlas_core::boundary::BoundaryRecord;
use atlas_core::digest::{Digest, HashAlgorithm};
use atlas_core::jurisdiction::{Continent, ContinentTable, CountryCode, RegionCode};

use crate::aggregate::{build_level, level_root};
use crate::config::{Hierarchy, Level, TreeConfig};
use crate::error::TreeError;
use crate::leaf::{build_leaf, LeafCommitment};
use crate::primitive::{hasher_for, PairHasher};

/// Key of the single node at the global level.
pub(crate) const GLOBAL_KEY: &str = "global";

// ---- leaves ----

/// One leaf of the tree: the commitment plus the grouping axes it
/// aggregates under.
///
/// The axes travel with the commitment so a tree can be reassembled
/// (by the incremental updater) without re-reading, re-validating, or
/// re-hashing the original records.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafEntry {
    /// The leaf commitment.
    pub commitment: LeafCommitment,
    /// Country the leaf groups under.
    pub country: CountryCode,
    /// Region the leaf groups under.
    pub region: RegionCode,
}

// ---- aggregation nodes ----

/// One aggregation group: a region, a country, a continent, or the
/// global node.
///
/// Fields are private; nodes are only ever constructed by the builder,
/// so `root` is always the fold of `layers` and `member_keys` always
/// parallels the base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationNode {
    key: String,
    member_keys: Vec<String>,
    layers: Vec<Vec<Digest>>,
    root: Digest,
}

impl AggregationNode {
    fn build(
        hasher: &dyn PairHasher,
        key: String,
        member_keys: Vec<String>,
        members: &[Digest],
    ) -> Result<Self, TreeError> {
        debug_assert_eq!(member_keys.len(), members.len());
        let layers = build_level(hasher, members)?;
        let root = level_root(&layers)?;
        Ok(Self {
            key,
            member_keys,
            layers,
            root,
        })
    }

    /// The group key: `"CC/RR"`, `"CC"`, a continent tag, or `"global"`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Member keys in member order: leaf ids at the region level (and at
    /// the global level of a flat tree), child group keys everywhere
    /// else.
    pub fn member_keys(&self) -> &[String] {
        &self.member_keys
    }

    /// Number of direct members.
    pub fn member_count(&self) -> usize {
        self.member_keys.len()
    }

    /// All pairing layers, base layer first, root layer last.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// The node's root digest.
    pub fn root(&self) -> Digest {
        self.root
    }
}

/// All nodes of one hierarchy level, sorted by group key.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLevel {
    level: Level,
    nodes: Vec<AggregationNode>,
}

impl TreeLevel {
    /// The level these nodes belong to.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Nodes in key order.
    pub fn nodes(&self) -> &[AggregationNode] {
        &self.nodes
    }

    /// Look up a node by its group key.
    pub fn node(&self, key: &str) -> Option<&AggregationNode> {
        self.nodes
            .binary_search_by(|node| node.key.as_str().cmp(key))
            .ok()
            .map(|index| &self.nodes[index])
    }
}

// ---- the tree ----

/// A fully built commitment tree.
///
/// Immutable once built; [`crate::update::incremental_update`] produces
/// a new tree rather than mutating an existing one.
#[derive(Debug, Clone)]
pub struct Tree {
    config: TreeConfig,
    leaves: Vec<LeafEntry>,
    levels: Vec<TreeLevel>,
    global_root: Digest,
}

impl Tree {
    /// Build a tree over `records` under `config`.
    ///
    /// # Errors
    ///
    /// Fails on an empty record set, a duplicate id, a record whose
    /// geometry does not validate, or — under a geographic hierarchy —
    /// a country missing from the continent table. Any failure aborts
    /// the whole build; a tree is never published with records silently
    /// dropped.
    pub fn build(config: TreeConfig, records: &[BoundaryRecord]) -> Result<Self, TreeError> {
        if records.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let hasher = hasher_for(config.algorithm);
        let mut leaves = Vec::with_capacity(records.len());
        for record in records {
            leaves.push(LeafEntry {
                commitment: build_leaf(hasher.as_ref(), record)?,
                country: record.country.clone(),
                region: record.region.clone(),
            });
        }
        Self::assemble(config, leaves)
    }

    /// Assemble a tree from already-hashed leaves.
    ///
    /// Shared by [`Self::build`] and the incremental updater, which
    /// reuses surviving commitments instead of re-hashing them.
    pub(crate) fn assemble(
        config: TreeConfig,
        mut leaves: Vec<LeafEntry>,
    ) -> Result<Self, TreeError> {
        if leaves.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        leaves.sort_by(|a, b| a.commitment.id.cmp(&b.commitment.id));
        for pair in leaves.windows(2) {
            if pair[0].commitment.id == pair[1].commitment.id {
                return Err(TreeError::DuplicateId(pair[0].commitment.id.clone()));
            }
        }

        let hasher = hasher_for(config.algorithm);
        let levels = match &config.hierarchy {
            Hierarchy::Flat => build_flat(hasher.as_ref(), &leaves)?,
            Hierarchy::Geographic { continents } => {
                // Resolve every country up front so an unmapped country
                // fails the build before any aggregation work is done.
                for leaf in &leaves {
                    continents.lookup(&leaf.country)?;
                }
                build_geographic(hasher.as_ref(), &leaves, continents)?
            }
        };
        let global_root = levels
            .last()
            .and_then(|level| level.nodes.first())
            .map(AggregationNode::root)
            .ok_or(TreeError::EmptyLevel)?;

        Ok(Self {
            config,
            leaves,
            levels,
            global_root,
        })
    }

    /// The configuration the tree was built under.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The hash primitive in use.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.config.algorithm
    }

    /// Number of aggregation levels: 1 flat, 4 geographic.
    pub fn hierarchy_depth(&self) -> usize {
        self.config.hierarchy.depth()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaves in id order.
    pub fn leaves(&self) -> &[LeafEntry] {
        &self.leaves
    }

    /// Look up a leaf by id.
    pub fn leaf(&self, id: &str) -> Option<&LeafEntry> {
        self.leaves
            .binary_search_by(|entry| entry.commitment.id.as_str().cmp(id))
            .ok()
            .map(|index| &self.leaves[index])
    }

    /// All levels, bottom-up.
    pub fn levels(&self) -> &[TreeLevel] {
        &self.levels
    }

    /// The nodes of one level, if the hierarchy contains it.
    pub fn level(&self, level: Level) -> Option<&TreeLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// The single root committing to every record.
    pub fn global_root(&self) -> Digest {
        self.global_root
    }
}

// ---- per-hierarchy assembly ----

fn build_flat(hasher: &dyn PairHasher, leaves: &[LeafEntry]) -> Result<Vec<TreeLevel>, TreeError> {
    let member_keys = leaves
        .iter()
        .map(|leaf| leaf.commitment.id.as_str().to_owned())
        .collect();
    let members: Vec<Digest> = leaves.iter().map(|leaf| leaf.commitment.leaf_hash).collect();
    let node = AggregationNode::build(hasher, GLOBAL_KEY.to_owned(), member_keys, &members)?;
    Ok(vec![TreeLevel {
        level: Level::Global,
        nodes: vec![node],
    }])
}

fn build_geographic(
    hasher: &dyn PairHasher,
    leaves: &[LeafEntry],
    continents: &ContinentTable,
) -> Result<Vec<TreeLevel>, TreeError> {
    // Leaves arrive sorted by id, so each region group's member list is
    // already in id order. BTreeMap iteration yields groups in key
    // order, which for `(country, region)` tuples equals the order of
    // the qualified `"CC/RR"` strings: country codes are fixed-width and
    // region codes cannot contain `/`.
    let mut region_groups: BTreeMap<(CountryCode, RegionCode), (Vec<String>, Vec<Digest>)> =
        BTreeMap::new();
    for leaf in leaves {
        let group = region_groups
            .entry((leaf.country.clone(), leaf.region.clone()))
            .or_default();
        group.0.push(leaf.commitment.id.as_str().to_owned());
        group.1.push(leaf.commitment.leaf_hash);
    }

    let mut region_nodes = Vec::with_capacity(region_groups.len());
    let mut country_groups: BTreeMap<CountryCode, (Vec<String>, Vec<Digest>)> = BTreeMap::new();
    for ((country, region), (member_keys, members)) in region_groups {
        let node = AggregationNode::build(
            hasher,
            format!("{country}/{region}"),
            member_keys,
            &members,
        )?;
        let group = country_groups.entry(country).or_default();
        group.0.push(node.key.clone());
        group.1.push(node.root);
        region_nodes.push(node);
    }

    let mut country_nodes = Vec::with_capacity(country_groups.len());
    let mut continent_groups: BTreeMap<Continent, (Vec<String>, Vec<Digest>)> = BTreeMap::new();
    for (country, (member_keys, members)) in country_groups {
        let node =
            AggregationNode::build(hasher, country.as_str().to_owned(), member_keys, &members)?;
        let continent = continents.lookup(&country)?;
        let group = continent_groups.entry(continent).or_default();
        group.0.push(node.key.clone());
        group.1.push(node.root);
        country_nodes.push(node);
    }

    let mut continent_nodes = Vec::with_capacity(continent_groups.len());
    let mut global_keys = Vec::with_capacity(continent_groups.len());
    let mut global_members = Vec::with_capacity(continent_groups.len());
    for (continent, (member_keys, members)) in continent_groups {
        let node = AggregationNode::build(
            hasher,
            continent.as_str().to_owned(),
            member_keys,
            &members,
        )?;
        global_keys.push(node.key.clone());
        global_members.push(node.root);
        continent_nodes.push(node);
    }

    let global_node =
        AggregationNode::build(hasher, GLOBAL_KEY.to_owned(), global_keys, &global_members)?;

    Ok(vec![
        TreeLevel {
            level: Level::Region,
            nodes: region_nodes,
        },
        TreeLevel {
            level: Level::Country,
            nodes: country_nodes,
        },
        TreeLevel {
            level: Level::Continent,
            nodes: continent_nodes,
        },
        TreeLevel {
            level: Level::Global,
            nodes: vec![global_node],
        },
    ])
}
