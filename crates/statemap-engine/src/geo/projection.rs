use std::f64::consts::{FRAC_PI_4, PI};

use super::geodesy::geodetic_to_ecef;
use super::point::GeoPoint;

/// Latitude bound applied before the Mercator formula.
///
/// `ln(tan(π/4 + φ/2))` diverges at ±90°; inputs beyond this bound are clamped
/// onto it, so output stays finite and deterministic.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0;

/// Default Mercator width: `R = width / π`, so `x` equals longitude in degrees.
pub const DEFAULT_MERCATOR_WIDTH: f64 = 180.0;

/// Render-space coordinate system for projected geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum ProjectionMode {
    /// `(lon, lat, 0)` in degrees. No distortion correction.
    #[default]
    PlateCarree,

    /// Spherical Web-Mercator with reference radius `width / π`.
    WebMercator { width: f64 },

    /// WGS84 Earth-centered, Earth-fixed meters.
    Ecef,
}

impl ProjectionMode {
    pub const fn web_mercator() -> Self {
        Self::WebMercator {
            width: DEFAULT_MERCATOR_WIDTH,
        }
    }

    /// Projects a single point.
    ///
    /// Returns `None` when the input has a non-finite coordinate or the
    /// projected position is not representable as finite `f32`s.
    pub fn project_point(self, p: GeoPoint) -> Option<[f32; 3]> {
        if !p.is_finite() {
            return None;
        }

        let xyz = match self {
            ProjectionMode::PlateCarree => [p.lon, p.lat, 0.0],
            ProjectionMode::WebMercator { width } => {
                let r = width / PI;
                let lat = p
                    .lat
                    .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
                    .to_radians();
                [
                    r * p.lon.to_radians(),
                    r * (FRAC_PI_4 + lat / 2.0).tan().ln(),
                    0.0,
                ]
            }
            ProjectionMode::Ecef => geodetic_to_ecef(p.lat, p.lon, p.elevation),
        };

        let v = xyz.map(|c| c as f32);
        v.iter().all(|c| c.is_finite()).then_some(v)
    }
}

/// Projects `points`, skipping any point whose projection is not finite.
///
/// Skips are logged once per call; order of the surviving points is kept.
pub fn project(points: &[GeoPoint], mode: ProjectionMode) -> Vec<[f32; 3]> {
    let out: Vec<[f32; 3]> = points
        .iter()
        .filter_map(|&p| mode.project_point(p))
        .collect();

    let skipped = points.len() - out.len();
    if skipped > 0 {
        log::warn!(
            "skipped {skipped} of {} points with non-finite {mode:?} projection",
            points.len()
        );
    }

    out
}

/// Projects every ring, dropping rings that end up empty.
pub fn project_parts(rings: &[Vec<GeoPoint>], mode: ProjectionMode) -> Vec<Vec<[f32; 3]>> {
    rings
        .iter()
        .map(|ring| project(ring, mode))
        .filter(|ring| !ring.is_empty())
        .collect()
}
