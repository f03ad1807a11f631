//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types for the foundational Atlas types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Geometry validation errors name the violating value so a rejected
//!   record can be traced back to its source dataset.
//! - Jurisdiction and identifier errors fail at construction; no invalid
//!   code or id ever circulates inside the system.
//! - Configuration errors are fatal at startup, never defaulted around.

use thiserror::Error;

use crate::jurisdiction::CountryCode;

/// Error while validating or canonicalizing a boundary geometry.
///
/// Any of these aborts leaf construction for the offending record; a
/// malformed geometry never reaches the hasher.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// The geometry contains no polygons at all.
    #[error("geometry must contain at least one polygon")]
    EmptyGeometry,

    /// A polygon contains no rings.
    #[error("polygon must contain at least one ring")]
    EmptyPolygon,

    /// A ring contains no positions.
    #[error("ring must contain at least one position")]
    EmptyRing,

    /// A coordinate is NaN or infinite.
    #[error("coordinate is not finite: {0}")]
    NonFiniteCoordinate(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),

    /// Latitude outside [-90, 90].
    #[error("latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    /// Canonical JSON serialization failed.
    #[error("canonical serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error while validating boundary-record fields.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// The boundary type tag is outside the closed enumeration.
    #[error("unsupported boundary type: {0:?}")]
    UnsupportedBoundaryType(String),

    /// The authority level ordinal is outside 1..=5.
    #[error("authority level must be between 1 and 5, got {0}")]
    AuthorityLevelOutOfRange(u8),

    /// The country code is not two ASCII uppercase letters.
    #[error("country code must be two ASCII uppercase letters, got {0:?}")]
    InvalidCountryCode(String),

    /// The region code is empty or contains a reserved character.
    #[error("invalid region code {0:?}: must be non-empty uppercase alphanumeric (plus '-'), '/' is reserved")]
    InvalidRegionCode(String),

    /// The boundary id is empty.
    #[error("boundary id must be non-empty")]
    InvalidBoundaryId,

    /// The continent tag is outside the closed enumeration.
    #[error("unknown continent tag: {0:?}")]
    UnknownContinent(String),

    /// A country has no entry in the continent table.
    ///
    /// Raised at tree-build time; the table is explicit and a missing
    /// mapping is a configuration defect, never silently defaulted.
    #[error("no continent mapping for country {0}")]
    UnmappedCountry(CountryCode),
}

/// Error while parsing a digest from its hex representation.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The hex string is not exactly 64 characters.
    #[error("digest hex must be exactly 64 characters, got {0}")]
    InvalidLength(usize),

    /// The hex string contains a non-hex character.
    #[error("digest hex contains a non-hex character at position {0}")]
    InvalidCharacter(usize),
}

/// Error in tree configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The hash primitive name is not one of the supported algorithms.
    ///
    /// Fatal at startup. An unrecognized primitive must never fall back
    /// to a default: a tree built under the wrong algorithm would anchor
    /// residency proofs nobody can verify.
    #[error("unknown hash primitive {0:?} (expected \"sha256\" or \"poseidon\")")]
    UnknownHashPrimitive(String),
}
