//! # Boundary Geometry Model
//!
//! GeoJSON-shaped polygon geometry for governance boundaries. The model
//! deliberately covers only the two geometry kinds real boundary datasets
//! use (`Polygon`, `MultiPolygon`); anything else fails deserialization.
//!
//! Validation is structural: no empty polygon or ring arrays, all
//! coordinates finite and inside longitude/latitude range. Ring closure
//! and winding order are not enforced here; the commitment binds the
//! coordinates exactly as the upstream dataset published them.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A single coordinate pair, serialized as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub f64, pub f64);

impl Position {
    /// Longitude in degrees, WGS 84.
    pub fn longitude(&self) -> f64 {
        self.0
    }

    /// Latitude in degrees, WGS 84.
    pub fn latitude(&self) -> f64 {
        self.1
    }

    fn validate(&self) -> Result<(), GeometryError> {
        for v in [self.0, self.1] {
            if !v.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate(v));
            }
        }
        if self.0 < -180.0 || self.0 > 180.0 {
            return Err(GeometryError::LongitudeOutOfRange(self.0));
        }
        if self.1 < -90.0 || self.1 > 90.0 {
            return Err(GeometryError::LatitudeOutOfRange(self.1));
        }
        Ok(())
    }
}

/// A boundary outline in GeoJSON geometry shape:
/// `{"type": "Polygon", "coordinates": [...]}`.
///
/// A `Polygon` is a list of rings (outer ring first, holes after); a
/// `MultiPolygon` is a list of polygons for territories with disjoint
/// parts (enclaves, islands).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// One polygon: a list of linear rings.
    Polygon(Vec<Vec<Position>>),
    /// Several disjoint polygons.
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Validate the geometry structurally.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: empty geometry, empty polygon,
    /// empty ring, non-finite coordinate, or out-of-range coordinate.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Geometry::Polygon(rings) => validate_polygon(rings),
            Geometry::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return Err(GeometryError::EmptyGeometry);
                }
                for rings in polygons {
                    validate_polygon(rings)?;
                }
                Ok(())
            }
        }
    }
}

fn validate_polygon(rings: &[Vec<Position>]) -> Result<(), GeometryError> {
    if rings.is_empty() {
        return Err(GeometryError::EmptyPolygon);
    }
    for ring in rings {
        if ring.is_empty() {
            return Err(GeometryError::EmptyRing);
        }
        for position in ring {
            position.validate()?;
        }
    }
    Ok(())
}
