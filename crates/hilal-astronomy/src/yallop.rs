//! Yallop's crescent visibility criterion.

use hilal_types::VisibilityCategory;

use crate::config::YallopThresholds;

pub const MOON_RADIUS_KM: f64 = 1737.4;
pub const AU_KM: f64 = 149_597_870.7;

/// q reported when the Moon is below the horizon at the best time.
pub const Q_MOON_BELOW_HORIZON: f64 = -999.0;

/// Apparent lunar semi-diameter in arcminutes.
pub fn semi_diameter_arcmin(geo_dist_au: f64) -> f64 {
    ((MOON_RADIUS_KM / AU_KM) / geo_dist_au).asin().to_degrees() * 60.0
}

/// Topocentric crescent width W in arcminutes.
pub fn crescent_width(geo_dist_au: f64, elongation_deg: f64) -> f64 {
    semi_diameter_arcmin(geo_dist_au) * (1.0 - elongation_deg.to_radians().cos())
}

/// `q = (ARCV - (11.8371 - 6.3226 W + 0.7319 W^2 - 0.1018 W^3)) / 10`
pub fn yallop_q(arcv: f64, width: f64) -> f64 {
    let w2 = width * width;
    let w3 = w2 * width;
    (arcv - (11.8371 - 6.3226 * width + 0.7319 * w2 - 0.1018 * w3)) / 10.0
}

/// Category for an observation; a Moon below the horizon is always E.
pub fn classify(moon_altitude: f64, q: f64, thresholds: &YallopThresholds) -> VisibilityCategory {
    if moon_altitude < 0.0 {
        VisibilityCategory::E
    } else {
        thresholds.classify(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_of_zero_width() {
        assert!((yallop_q(11.8371, 0.0)).abs() < 1e-12);
        assert!((yallop_q(21.8371, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn width_grows_with_elongation() {
        let d = 384_400.0 / AU_KM;
        let sd = semi_diameter_arcmin(d);
        assert!((sd - 15.54).abs() < 0.05, "{sd}");
        assert_eq!(crescent_width(d, 0.0), 0.0);
        assert!(crescent_width(d, 20.0) > crescent_width(d, 10.0));
        assert!((crescent_width(d, 90.0) - sd).abs() < 1e-9);
    }

    #[test]
    fn below_horizon_is_e() {
        let t = YallopThresholds::default();
        assert_eq!(classify(-0.1, 5.0, &t), VisibilityCategory::E);
        assert_eq!(classify(5.0, 5.0, &t), VisibilityCategory::A);
    }
}
