//! Apparent solar coordinates from VSOP87.

use crate::coords::{nutation, normalize_degrees};

/// FK5 frame correction to VSOP87 longitudes, degrees.
const FK5_CORRECTION: f64 = -0.090_33 / 3600.0;
/// Annual aberration constant, degrees per AU.
const ABERRATION: f64 = 20.4898 / 3600.0;

/// Apparent geocentric ecliptic position of the Sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent longitude, degrees.
    pub longitude: f64,
    /// Latitude, degrees.
    pub latitude: f64,
    /// Radius vector, astronomical units.
    pub distance_au: f64,
}

/// The Earth's heliocentric position (VSOP87D, ecliptic of date) turned around.
pub fn solar_position(jd: f64) -> SolarPosition {
    let earth = vsop87::vsop87d::earth(jd);
    let distance_au = earth.distance();
    let (dpsi, _) = nutation(jd);

    let geometric = earth.longitude().to_degrees() + 180.0;
    let longitude = geometric + FK5_CORRECTION + dpsi - ABERRATION / distance_au;

    SolarPosition {
        longitude: normalize_degrees(longitude),
        latitude: -earth.latitude().to_degrees(),
        distance_au,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_position() {
        // 1992-10-13 0h TD: 199.90737, 0.99760775 AU
        let p = solar_position(2_448_908.5);
        assert!((p.longitude - 199.907_37).abs() < 0.002, "{}", p.longitude);
        assert!((p.distance_au - 0.997_607_75).abs() < 1e-5, "{}", p.distance_au);
        assert!(p.latitude.abs() < 0.001);
    }

    #[test]
    fn longitude_advances_about_a_degree_per_day() {
        let a = solar_position(2_460_000.5).longitude;
        let b = solar_position(2_460_001.5).longitude;
        let d = normalize_degrees(b - a);
        assert!(d > 0.95 && d < 1.03, "{d}");
    }
}
