//! # Jurisdiction Primitives — Codes and the Continent Table
//!
//! Validated newtypes for the geographic grouping axes (country, region,
//! continent) and the explicit country-to-continent table used by the
//! hierarchical tree builder.
//!
//! ## Security Invariant
//!
//! Continent membership is never inferred. The table is explicit
//! configuration, and looking up an unmapped country is an error — a
//! country silently grouped under a wrong or default continent would
//! produce a structurally valid tree committing to the wrong hierarchy.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoundaryError;

/// ISO 3166-1 alpha-2 country code, e.g. `US`, `DE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and wrap a country code.
    pub fn new(code: &str) -> Result<Self, BoundaryError> {
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code.to_owned()))
        } else {
            Err(BoundaryError::InvalidCountryCode(code.to_owned()))
        }
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = BoundaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> String {
        code.0
    }
}

/// Sub-national region code, e.g. the `CA` of `US-CA` or a constituency
/// group code. Jurisdiction-specific, uppercase alphanumeric plus `-`.
///
/// `/` is rejected: it separates country from region in qualified group
/// keys, so a region code containing it would make keys ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Validate and wrap a region code.
    pub fn new(code: &str) -> Result<Self, BoundaryError> {
        let valid = !code.is_empty()
            && code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-');
        if valid {
            Ok(Self(code.to_owned()))
        } else {
            Err(BoundaryError::InvalidRegionCode(code.to_owned()))
        }
    }

    /// Access the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionCode {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = BoundaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> String {
        code.0
    }
}

/// The seven continents, identified by kebab-case tags.
///
/// Variant declaration order matches tag lexicographic order, so the
/// derived `Ord` sorts by tag. `test_variant_order_matches_tag_order`
/// guards this invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Continent {
    /// `africa`
    Africa,
    /// `antarctica`
    Antarctica,
    /// `asia`
    Asia,
    /// `europe`
    Europe,
    /// `north-america`
    NorthAmerica,
    /// `oceania`
    Oceania,
    /// `south-america`
    SouthAmerica,
}

impl Continent {
    /// All continents in tag order.
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Antarctica,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    /// Returns the kebab-case continent tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Africa => "africa",
            Self::Antarctica => "antarctica",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::NorthAmerica => "north-america",
            Self::Oceania => "oceania",
            Self::SouthAmerica => "south-america",
        }
    }
}

impl std::fmt::Display for Continent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Continent {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| BoundaryError::UnknownContinent(s.to_owned()))
    }
}

impl TryFrom<String> for Continent {
    type Error = BoundaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Continent> for String {
    fn from(continent: Continent) -> String {
        continent.as_str().to_owned()
    }
}

/// Explicit country-to-continent mapping.
///
/// Part of tree configuration. Lookup of an unmapped country fails with
/// [`BoundaryError::UnmappedCountry`]; there is no default continent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinentTable(BTreeMap<CountryCode, Continent>);

impl ContinentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(country, continent)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (CountryCode, Continent)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, country: CountryCode, continent: Continent) {
        self.0.insert(country, continent);
    }

    /// Resolve the continent for a country.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::UnmappedCountry` if the country has no
    /// entry.
    pub fn lookup(&self, country: &CountryCode) -> Result<Continent, BoundaryError> {
        self.0
            .get(country)
            .copied()
            .ok_or_else(|| BoundaryError::UnmappedCountry(country.clone()))
    }

    /// Number of mapped countries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no countries are mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
