//! Geographic input: points, region sources and projection into render space.
//!
//! Everything here is CPU-only and deterministic.

mod geodesy;
mod point;
mod projection;
mod source;

pub use geodesy::{geodetic_to_ecef, WGS84_A, WGS84_B, WGS84_E2, WGS84_F};
pub use point::GeoPoint;
pub use projection::{
    project, project_parts, ProjectionMode, DEFAULT_MERCATOR_WIDTH, MAX_MERCATOR_LATITUDE,
};
pub use source::{InMemoryRegions, Region, RegionSource, Ring, SourceError};
