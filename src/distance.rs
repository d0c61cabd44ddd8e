//! Great-circle distance on a sphere of Earth radius plus ISS altitude
//!
//! The altitude is a fixed constant, so the model assumes the platform
//! never climbs or sinks between two captures.

/// Mean Earth radius (ESA)
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Approximate ISS orbital altitude (ESA ISS tracker)
pub const ISS_ALTITUDE_KM: f64 = 420.0;

/// Radius of the sphere the ground track is measured on
pub const ORBIT_RADIUS_KM: f64 = EARTH_MEAN_RADIUS_KM + ISS_ALTITUDE_KM;

/// Haversine distance in kilometers between two points given in decimal degrees
///
/// No range validation is done; the haversine term is not clamped.
pub fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64, radius_km: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    c * radius_km
}

/// Distance in kilometers along the ISS orbit sphere ([`ORBIT_RADIUS_KM`])
pub fn distance_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    haversine_km(lon1, lat1, lon2, lat2, ORBIT_RADIUS_KM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        let tolerance = 1e-9 * a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= tolerance, "{a} != {b}");
    }

    #[test]
    fn test_orbit_radius() {
        assert_eq!(ORBIT_RADIUS_KM, 6791.0);
    }

    #[test]
    fn test_self_distance_is_zero() {
        for (lon, lat) in [(0.0, 0.0), (66.77867751, -20.2800441), (-179.9, 89.9), (180.0, -90.0)] {
            assert_eq!(distance_km(lon, lat, lon, lat), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [
            (66.77867751, -20.2800441),
            (69.11392852, -17.45516549),
            (171.5097129, 47.64335562),
            (-69.50729155, -49.8513892),
            (-13.0462651, -45.05238817),
        ];
        for &(lon1, lat1) in &points {
            for &(lon2, lat2) in &points {
                assert_close(
                    distance_km(lon1, lat1, lon2, lat2),
                    distance_km(lon2, lat2, lon1, lat1),
                );
            }
        }
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole is a quarter of the circumference
        let expected = std::f64::consts::FRAC_PI_2 * ORBIT_RADIUS_KM;
        assert_close(distance_km(0.0, 0.0, 0.0, 90.0), expected);
    }

    #[test]
    fn test_reference_pair() {
        let d = distance_km(66.77867751, -20.2800441, 69.11392852, -17.45516549);
        assert!((d - 425.0687).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_custom_radius_scales_linearly() {
        let on_ground = haversine_km(10.0, 20.0, 11.0, 21.0, EARTH_MEAN_RADIUS_KM);
        let in_orbit = distance_km(10.0, 20.0, 11.0, 21.0);
        assert_close(in_orbit / on_ground, ORBIT_RADIUS_KM / EARTH_MEAN_RADIUS_KM);
    }
}
