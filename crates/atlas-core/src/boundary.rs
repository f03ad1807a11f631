//! # Governance Boundary Records
//!
//! The input record model: one record per governance boundary as published
//! by the upstream extraction pipeline, camelCase on the wire.
//!
//! `BoundaryType` is a closed enumeration. A tag outside it fails
//! deserialization with `UnsupportedBoundaryType` — new kinds of boundary
//! enter the system by extending the enum, never by passing a free-form
//! string through to the hasher.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoundaryError;
use crate::geometry::Geometry;
use crate::identity::BoundaryId;
use crate::jurisdiction::{CountryCode, RegionCode};

/// The kind of governance boundary a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BoundaryType {
    /// `congressional_district`
    CongressionalDistrict,
    /// `state_legislative_upper`
    StateLegislativeUpper,
    /// `state_legislative_lower`
    StateLegislativeLower,
    /// `county`
    County,
    /// `municipality`
    Municipality,
    /// `city_council_district`
    CityCouncilDistrict,
    /// `school_district`
    SchoolDistrict,
    /// `parliamentary_constituency`
    ParliamentaryConstituency,
}

impl BoundaryType {
    /// All supported boundary types.
    pub const ALL: [BoundaryType; 8] = [
        BoundaryType::CongressionalDistrict,
        BoundaryType::StateLegislativeUpper,
        BoundaryType::StateLegislativeLower,
        BoundaryType::County,
        BoundaryType::Municipality,
        BoundaryType::CityCouncilDistrict,
        BoundaryType::SchoolDistrict,
        BoundaryType::ParliamentaryConstituency,
    ];

    /// Returns the snake_case wire tag.
    ///
    /// These bytes enter leaf hashing; the tag of an existing variant
    /// must never change.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CongressionalDistrict => "congressional_district",
            Self::StateLegislativeUpper => "state_legislative_upper",
            Self::StateLegislativeLower => "state_legislative_lower",
            Self::County => "county",
            Self::Municipality => "municipality",
            Self::CityCouncilDistrict => "city_council_district",
            Self::SchoolDistrict => "school_district",
            Self::ParliamentaryConstituency => "parliamentary_constituency",
        }
    }
}

impl std::fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryType {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BoundaryError::UnsupportedBoundaryType(s.to_owned()))
    }
}

impl TryFrom<String> for BoundaryType {
    type Error = BoundaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BoundaryType> for String {
    fn from(boundary_type: BoundaryType) -> String {
        boundary_type.as_str().to_owned()
    }
}

/// Administrative authority ordinal, 1 through 5.
///
/// 1 = national, 2 = state or provincial, 3 = county, 4 = municipal,
/// 5 = sub-municipal district. Bound into the leaf commitment so a
/// record cannot be silently promoted or demoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AuthorityLevel(u8);

impl AuthorityLevel {
    /// Validate and wrap an authority level.
    pub fn new(level: u8) -> Result<Self, BoundaryError> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(BoundaryError::AuthorityLevelOutOfRange(level))
        }
    }

    /// The raw ordinal.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for AuthorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for AuthorityLevel {
    type Error = BoundaryError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<AuthorityLevel> for u8 {
    fn from(level: AuthorityLevel) -> u8 {
        level.0
    }
}

/// One governance boundary as published by the upstream dataset.
///
/// Records arrive as a flat JSON array; the tree builder groups them by
/// `(country, region)`. `parent_id` names the enclosing boundary where
/// the dataset provides one and is carried for lineage only — hierarchy
/// placement comes from `country`/`region`, never from `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRecord {
    /// Stable unique id, e.g. `us-ca-cd-12`.
    pub id: BoundaryId,
    /// Human-readable name, e.g. `"California's 12th congressional district"`.
    pub name: String,
    /// ISO country code.
    pub country: CountryCode,
    /// Sub-national region code.
    pub region: RegionCode,
    /// Kind of boundary.
    pub boundary_type: BoundaryType,
    /// Boundary outline.
    pub geometry: Geometry,
    /// Administrative authority ordinal.
    pub authority_level: AuthorityLevel,
    /// Enclosing boundary id, if the dataset records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BoundaryId>,
}
