//! # Canonical Geometry Encoding — Deterministic Digest Input
//!
//! This module defines `CanonicalGeometry`, the sole construction path for
//! the geometry bytes that enter leaf hashing. Two records describing the
//! same boundary must digest identically on every platform, so raw floats
//! never reach the serializer.
//!
//! ## Security Invariant
//!
//! The `CanonicalGeometry` newtype has a private inner field. The only way
//! to construct it is through `CanonicalGeometry::new()`, which validates
//! the geometry, scales every coordinate to a fixed-precision integer, and
//! serializes the result with RFC 8785 (JCS): sorted keys, compact
//! separators, deterministic byte sequence.
//!
//! Any function hashing geometry accepts `&CanonicalGeometry`, so a
//! non-canonical encoding path cannot exist by construction.
//!
//! ## Encoding
//!
//! Coordinates are multiplied by 10^7 and rounded half-away-from-zero to
//! `i64` before serialization. 10^-7 degrees is roughly 1.1 cm at the
//! equator, far below the survey accuracy of any governance boundary, and
//! the scaled range (±1.8 × 10^9) is exact in both `i64` and JSON numbers.
//! Differences below the scale quantum collapse to the same encoding;
//! differences at or above it always produce different bytes.

use serde::Serialize;

use crate::error::GeometryError;
use crate::geometry::{Geometry, Position};

/// Scale factor mapping degrees to fixed-precision integer units.
const COORDINATE_SCALE: f64 = 1e7;

/// Canonical geometry bytes, produced exclusively by validation, fixed
/// precision scaling, and JCS serialization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalGeometry::new()`.
/// - The encoded JSON contains integers only, never floats.
/// - Keys are sorted and separators compact (RFC 8785).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalGeometry(Vec<u8>);

impl CanonicalGeometry {
    /// Validate and canonically encode a geometry.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`GeometryError`] if the geometry is
    /// structurally malformed or a coordinate is non-finite or out of
    /// range. Serialization itself cannot fail on validated input but
    /// propagates as `GeometryError::Serialization` rather than panicking.
    pub fn new(geometry: &Geometry) -> Result<Self, GeometryError> {
        geometry.validate()?;
        let scaled = scale_geometry(geometry);
        let s = serde_jcs::to_string(&scaled)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    ///
    /// Never the case for a constructed value; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalGeometry {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Shadow of [`Geometry`] with coordinates scaled to integer units.
/// Serializes to the same GeoJSON shape, all-integer.
#[derive(Serialize)]
#[serde(tag = "type", content = "coordinates")]
enum ScaledGeometry {
    Polygon(Vec<Vec<[i64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[i64; 2]>>>),
}

fn scale_geometry(geometry: &Geometry) -> ScaledGeometry {
    match geometry {
        Geometry::Polygon(rings) => ScaledGeometry::Polygon(scale_rings(rings)),
        Geometry::MultiPolygon(polygons) => {
            ScaledGeometry::MultiPolygon(polygons.iter().map(|rings| scale_rings(rings)).collect())
        }
    }
}

fn scale_rings(rings: &[Vec<Position>]) -> Vec<Vec<[i64; 2]>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(scale_position).collect())
        .collect()
}

fn scale_position(position: &Position) -> [i64; 2] {
    [
        scale_coordinate(position.longitude()),
        scale_coordinate(position.latitude()),
    ]
}

/// `f64::round` is half-away-from-zero, so -0.35e-7 and 0.35e-7 degrees
/// scale symmetrically.
fn scale_coordinate(value: f64) -> i64 {
    (value * COORDINATE_SCALE).round() as i64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn positions() -> impl Strategy<Value = Position> {
        (-180.0..=180.0f64, -90.0..=90.0f64).prop_map(|(lon, lat)| Position(lon, lat))
    }

    fn rings() -> impl Strategy<Value = Vec<Vec<Position>>> {
        prop::collection::vec(prop::collection::vec(positions(), 1..8), 1..4)
    }

    fn geometries() -> impl Strategy<Value = Geometry> {
        prop_oneof![
            rings().prop_map(Geometry::Polygon),
            prop::collection::vec(rings(), 1..3).prop_map(Geometry::MultiPolygon),
        ]
    }

    proptest! {
        /// Canonicalization succeeds for every structurally valid geometry.
        #[test]
        fn canonical_never_fails_on_valid_input(geometry in geometries()) {
            prop_assert!(CanonicalGeometry::new(&geometry).is_ok());
        }

        /// Same geometry always produces the same bytes.
        #[test]
        fn canonical_deterministic(geometry in geometries()) {
            let a = CanonicalGeometry::new(&geometry).unwrap();
            let b = CanonicalGeometry::new(&geometry).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        /// Canonical bytes are valid JSON and contain no float syntax.
        #[test]
        fn canonical_is_integer_json(geometry in geometries()) {
            let canonical = CanonicalGeometry::new(&geometry).unwrap();
            let s = std::str::from_utf8(canonical.as_bytes()).unwrap();
            prop_assert!(serde_json::from_str::<serde_json::Value>(s).is_ok());
            prop_assert!(!s.contains('.'), "float syntax leaked into canonical encoding: {s}");
        }
    }
}
