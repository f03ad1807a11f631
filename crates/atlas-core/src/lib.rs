//! # atlas-core — Foundational Types for the Atlas Boundary Commitment Stack
//!
//! This crate defines the type-system primitives everything else builds
//! on: validated jurisdiction codes and identifiers, the governance
//! boundary record model, canonical geometry encoding, digest and
//! hash-algorithm tags, and UTC timestamps. Every other crate in the
//! workspace depends on `atlas-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `BoundaryId`,
//!    `CountryCode`, `RegionCode`, `AuthorityLevel` — all newtypes with
//!    validated constructors. No bare strings for identifiers.
//!
//! 2. **`CanonicalGeometry` newtype.** ALL geometry digest input flows
//!    through `CanonicalGeometry::new()`: validation, fixed-precision
//!    integer scaling, RFC 8785 serialization. Raw floats never reach a
//!    hasher.
//!
//! 3. **Closed enumerations.** `BoundaryType`, `Continent`, and
//!    `HashAlgorithm` are closed; unknown wire tags are rejected at the
//!    serde boundary, never passed through.
//!
//! 4. **Explicit continent mapping.** `ContinentTable` lookups fail on
//!    unmapped countries. There is no default continent.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `atlas-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod boundary;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod geometry;
pub mod identity;
pub mod jurisdiction;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use boundary::{AuthorityLevel, BoundaryRecord, BoundaryType};
pub use canonical::CanonicalGeometry;
pub use digest::{Digest, HashAlgorithm};
pub use error::{BoundaryError, ConfigError, DigestError, GeometryError};
pub use geometry::{Geometry, Position};
pub use identity::{BoundaryId, SnapshotId};
pub use jurisdiction::{Continent, ContinentTable, CountryCode, RegionCode};
pub use temporal::Timestamp;
