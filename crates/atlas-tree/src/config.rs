//! # Tree Configuration
//!
//! A tree is built under an explicit `TreeConfig`: the hash primitive
//! and the hierarchy shape. Both are recorded with the tree and travel
//! into its snapshot; nothing about tree shape is inferred from the
//! records themselves.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use atlas_core::digest::HashAlgorithm;
use atlas_core::jurisdiction::ContinentTable;

use crate::error::TreeError;

/// An aggregation tier of the hierarchy, bottom-up.
///
/// The derived ordering follows aggregation order: `Region < Country <
/// Continent < Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Leaves grouped by `(country, region)`.
    Region,
    /// Region roots grouped by country.
    Country,
    /// Country roots grouped by the continent table.
    Continent,
    /// The single root over everything.
    Global,
}

impl Level {
    /// Returns the lowercase wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Country => "country",
            Self::Continent => "continent",
            Self::Global => "global",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "region" => Ok(Self::Region),
            "country" => Ok(Self::Country),
            "continent" => Ok(Self::Continent),
            "global" => Ok(Self::Global),
            other => Err(TreeError::InvalidTargetLevel(other.to_owned())),
        }
    }
}

/// The hierarchy shape a tree aggregates through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    /// A single global level: every leaf folds directly into one root.
    Flat,
    /// Region, country, continent, global — the full four-tier
    /// aggregation. Requires an explicit continent table covering every
    /// country in the dataset.
    Geographic {
        /// Country-to-continent mapping.
        continents: ContinentTable,
    },
}

impl Hierarchy {
    /// The levels this hierarchy aggregates through, bottom-up.
    pub fn levels(&self) -> &'static [Level] {
        match self {
            Self::Flat => &[Level::Global],
            Self::Geographic { .. } => {
                &[Level::Region, Level::Country, Level::Continent, Level::Global]
            }
        }
    }

    /// Number of aggregation levels.
    pub fn depth(&self) -> usize {
        self.levels().len()
    }
}

/// Full configuration for one tree build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// The hash primitive; fixed for the tree's whole lifetime.
    pub algorithm: HashAlgorithm,
    /// The hierarchy shape.
    pub hierarchy: Hierarchy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::jurisdiction::{Continent, CountryCode};

    #[test]
    fn test_level_tags() {
        for level in [Level::Region, Level::Country, Level::Continent, Level::Global] {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
        assert!(matches!(
            "planet".parse::<Level>(),
            Err(TreeError::InvalidTargetLevel(ref s)) if s == "planet"
        ));
    }

    #[test]
    fn test_level_ordering_is_bottom_up() {
        assert!(Level::Region < Level::Country);
        assert!(Level::Country < Level::Continent);
        assert!(Level::Continent < Level::Global);
    }

    #[test]
    fn test_hierarchy_levels() {
        assert_eq!(Hierarchy::Flat.levels(), &[Level::Global]);
        assert_eq!(Hierarchy::Flat.depth(), 1);

        let geographic = Hierarchy::Geographic {
            continents: ContinentTable::new(),
        };
        assert_eq!(
            geographic.levels(),
            &[Level::Region, Level::Country, Level::Continent, Level::Global]
        );
        assert_eq!(geographic.depth(), 4);
    }

    #[test]
    fn test_config_yaml_flat() {
        let yaml = "algorithm: sha256\nhierarchy: flat\n";
        let config: TreeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.hierarchy, Hierarchy::Flat);
    }

    #[test]
    fn test_config_yaml_geographic() {
        let yaml = concat!(
            "algorithm: poseidon\n",
            "hierarchy:\n",
            "  geographic:\n",
            "    continents:\n",
            "      US: north-america\n",
            "      DE: europe\n",
        );
        let config: TreeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.algorithm, HashAlgorithm::Poseidon);
        match config.hierarchy {
            Hierarchy::Geographic { continents } => {
                assert_eq!(
                    continents.lookup(&CountryCode::new("US").unwrap()).unwrap(),
                    Continent::NorthAmerica
                );
            }
            other => panic!("expected geographic hierarchy, got {other:?}"),
        }
    }

    #[test]
    fn test_config_yaml_unknown_algorithm() {
        let yaml = "algorithm: blake3\nhierarchy: flat\n";
        let err = serde_yaml::from_str::<TreeConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown hash primitive"));
    }
}
