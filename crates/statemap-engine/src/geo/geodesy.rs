/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

/// Geodetic degrees + elevation to Earth-centered, Earth-fixed meters.
///
/// +X points at (0°, 0°), +Y at (90°E, 0°), +Z at the north pole.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, elevation_m: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();

    // Prime vertical radius of curvature.
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    [
        (n + elevation_m) * cos_lat * cos_lon,
        (n + elevation_m) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + elevation_m) * sin_lat,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn equator_prime_meridian() {
        let [x, y, z] = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert_close(x, WGS84_A, 1e-6);
        assert_close(y, 0.0, 1e-6);
        assert_close(z, 0.0, 1e-6);
    }

    #[test]
    fn equator_90_east() {
        let [x, y, z] = geodetic_to_ecef(0.0, 90.0, 0.0);
        assert_close(x, 0.0, 1e-6);
        assert_close(y, WGS84_A, 1e-6);
        assert_close(z, 0.0, 1e-6);
    }

    #[test]
    fn north_pole_sits_on_minor_axis() {
        let [x, y, z] = geodetic_to_ecef(90.0, 0.0, 0.0);
        assert_close(x, 0.0, 1e-6);
        assert_close(y, 0.0, 1e-6);
        assert_close(z, WGS84_B, 1e-6);
    }

    #[test]
    fn elevation_extends_along_normal() {
        let [x, _, _] = geodetic_to_ecef(0.0, 0.0, 250.0);
        assert_close(x, WGS84_A + 250.0, 1e-6);
    }
}
