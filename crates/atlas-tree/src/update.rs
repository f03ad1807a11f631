//! # Incremental Updates
//!
//! Appends new records to an existing tree under an append-only policy:
//! an id already committed to the tree wins over any new record carrying
//! the same id. Dropped ids are reported, never silently discarded, so
//! callers can audit exactly which submissions were rejected.
//!
//! ## Design
//!
//! Surviving records are leaf-hashed once and merged with the existing
//! leaf entries, then the combined set goes through a full rebuild under
//! the existing configuration. Builds are deterministic, so the rebuild
//! is exactly the tree that a from-scratch build over the merged records
//! would produce — there is no patched-in-place state to drift.

use std::collections::BTreeSet;

use atlas_core::boundary::BoundaryRecord;
use atlas_core::digest::Digest;
use atlas_core::identity::BoundaryId;

use crate::builder::{LeafEntry, Tree};
use crate::error::TreeError;
use crate::leaf::build_leaf;
use crate::primitive::hasher_for;

/// Outcome of one incremental update.
#[derive(Debug)]
pub struct TreeUpdate {
    /// The rebuilt tree over the merged leaf set.
    pub tree: Tree,
    /// Whether the global root moved.
    pub root_changed: bool,
    /// The global root before the update.
    pub previous_root: Digest,
    /// Number of new leaves appended.
    pub appended: usize,
    /// Ids rejected because an entry with the same id already existed —
    /// in the tree, or earlier in `records` (first occurrence wins).
    pub dropped: Vec<BoundaryId>,
}

/// Append `records` to `existing`, producing a new tree.
///
/// Existing leaves are reused as-is; only surviving new records are
/// hashed. The existing tree is untouched.
///
/// # Errors
///
/// Fails if a surviving record does not validate, or if — under a
/// geographic hierarchy — its country is missing from the continent
/// table. Id collisions are not errors; they are reported in
/// [`TreeUpdate::dropped`].
pub fn incremental_update(
    existing: &Tree,
    records: &[BoundaryRecord],
) -> Result<TreeUpdate, TreeError> {
    let mut seen: BTreeSet<&str> = existing
        .leaves()
        .iter()
        .map(|leaf| leaf.commitment.id.as_str())
        .collect();

    let hasher = hasher_for(existing.algorithm());
    let mut merged = existing.leaves().to_vec();
    let mut appended = 0;
    let mut dropped = Vec::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            dropped.push(record.id.clone());
            continue;
        }
        merged.push(LeafEntry {
            commitment: build_leaf(hasher.as_ref(), record)?,
            country: record.country.clone(),
            region: record.region.clone(),
        });
        appended += 1;
    }

    let previous_root = existing.global_root();
    let tree = Tree::assemble(existing.config().clone(), merged)?;
    let root_changed = tree.global_root() != previous_root;

    Ok(TreeUpdate {
        tree,
        root_changed,
        previous_root,
        appended,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use atlas_core::boundary::{AuthorityLevel, BoundaryType};
    use atlas_core::digest::HashAlgorithm;
    use atlas_core::geometry::{Geometry, Position};
    use atlas_core::jurisdiction::{Continent, ContinentTable, CountryCode, RegionCode};

    use crate::config::{Hierarchy, TreeConfig};

    fn record(id: &str, country: &str, region: &str, lon: f64) -> BoundaryRecord {
        BoundaryRecord {
            id: BoundaryId::new(id).unwrap(),
            name: format!("Boundary {id}"),
            country: CountryCode::new(country).unwrap(),
            region: RegionCode::new(region).unwrap(),
            boundary_type: BoundaryType::Municipality,
            geometry: Geometry::Polygon(vec![vec![
                Position(lon, 5.0),
                Position(lon + 0.5, 5.0),
                Position(lon + 0.5, 5.5),
            ]]),
            authority_level: AuthorityLevel::new(4).unwrap(),
            parent_id: None,
        }
    }

    fn config() -> TreeConfig {
        TreeConfig {
            algorithm: HashAlgorithm::Sha256,
            hierarchy: Hierarchy::Geographic {
                continents: ContinentTable::from_entries([
                    (CountryCode::new("US").unwrap(), Continent::NorthAmerica),
                    (CountryCode::new("DE").unwrap(), Continent::Europe),
                ]),
            },
        }
    }

    #[test]
    fn test_update_appends_and_moves_root() {
        let base = Tree::build(config(), &[record("a", "US", "CA", 10.0)]).unwrap();
        let update = incremental_update(&base, &[record("b", "DE", "BY", 20.0)]).unwrap();

        assert!(update.root_changed);
        assert_eq!(update.previous_root, base.global_root());
        assert_eq!(update.appended, 1);
        assert!(update.dropped.is_empty());
        assert_eq!(update.tree.leaf_count(), 2);
        assert_ne!(update.tree.global_root(), base.global_root());
    }

    #[test]
    fn test_update_matches_from_scratch_build() {
        let base = Tree::build(
            config(),
            &[record("a", "US", "CA", 10.0), record("b", "US", "TX", 11.0)],
        )
        .unwrap();
        let update = incremental_update(&base, &[record("c", "DE", "BY", 12.0)]).unwrap();

        let rebuilt = Tree::build(
            config(),
            &[
                record("a", "US", "CA", 10.0),
                record("b", "US", "TX", 11.0),
                record("c", "DE", "BY", 12.0),
            ],
        )
        .unwrap();
        assert_eq!(update.tree.global_root(), rebuilt.global_root());
    }

    #[test]
    fn test_existing_entry_wins_over_colliding_record() {
        let base = Tree::build(config(), &[record("a", "US", "CA", 10.0)]).unwrap();
        // Same id, different geometry: must not displace the committed leaf.
        let update = incremental_update(&base, &[record("a", "US", "CA", 99.0)]).unwrap();

        assert!(!update.root_changed);
        assert_eq!(update.appended, 0);
        assert_eq!(update.dropped.len(), 1);
        assert_eq!(update.dropped[0].as_str(), "a");
        assert_eq!(update.tree.global_root(), base.global_root());
        assert_eq!(
            update.tree.leaf("a").unwrap().commitment,
            base.leaf("a").unwrap().commitment
        );
    }

    #[test]
    fn test_first_occurrence_wins_among_new_records() {
        let base = Tree::build(config(), &[record("a", "US", "CA", 10.0)]).unwrap();
        let update = incremental_update(
            &base,
            &[record("b", "US", "TX", 20.0), record("b", "DE", "BY", 30.0)],
        )
        .unwrap();

        assert_eq!(update.appended, 1);
        assert_eq!(update.dropped.len(), 1);
        assert_eq!(update.dropped[0].as_str(), "b");
        assert_eq!(update.tree.leaf("b").unwrap().country.as_str(), "US");
    }

    #[test]
    fn test_update_propagates_validation_failure() {
        let base = Tree::build(config(), &[record("a", "US", "CA", 10.0)]).unwrap();
        let mut bad = record("b", "US", "TX", 20.0);
        bad.geometry = Geometry::Polygon(vec![]);
        let result = incremental_update(&base, &[bad]);
        assert!(matches!(result, Err(TreeError::Geometry(_))));
    }

    #[test]
    fn test_update_rejects_unmapped_country() {
        let base = Tree::build(config(), &[record("a", "US", "CA", 10.0)]).unwrap();
        let result = incremental_update(&base, &[record("b", "JP", "13", 20.0)]);
        assert!(matches!(
            result,
            Err(TreeError::Boundary(
                atlas_core::error::BoundaryError::UnmappedCountry(_)
            ))
        ));
    }
}
