//! Bundled analytic ephemeris.
//!
//! Moon: ELP-2000/82 truncated series from the `astro` crate. Sun: VSOP87D
//! through [`crate::solar`]. The Moon dominates the error at a few hundredths
//! of a degree, which keeps event times within a minute or two.

use chrono::{DateTime, Utc};

use crate::coords::{
    self, ecliptic_to_equatorial, equatorial_to_horizontal, julian_day, normalize_degrees,
    nutation, obliquity, parallax_in_altitude, refraction, signed_degrees,
};
use crate::ephemeris::{
    Body, Direction, Ephemeris, EphemerisError, Horizontal, Illumination, Observer,
};
use crate::search::{Scan, find_crossing};
use crate::solar::solar_position;
use crate::yallop::{AU_KM, MOON_RADIUS_KM};

const SUN_RADIUS_KM: f64 = 696_000.0;
/// Standard refraction at the horizon used for rise/set, degrees.
const HORIZON_REFRACTION: f64 = 34.0 / 60.0;

/// Geocentric apparent ecliptic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Ecliptic {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
}

/// Analytic Sun/Moon ephemeris with no external data files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeeusEphemeris;

impl MeeusEphemeris {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn ecliptic(&self, body: Body, jd: f64) -> Ecliptic {
        match body {
            Body::Sun => {
                let s = solar_position(jd);
                Ecliptic {
                    longitude: s.longitude,
                    latitude: s.latitude,
                    distance_km: s.distance_au * AU_KM,
                }
            }
            Body::Moon => {
                let (point, distance_km) = astro::lunar::geocent_ecl_pos(jd);
                let (dpsi, _) = nutation(jd);
                Ecliptic {
                    longitude: normalize_degrees(point.long.to_degrees() + dpsi),
                    latitude: point.lat.to_degrees(),
                    distance_km,
                }
            }
        }
    }

    /// Topocentric altitude before refraction, with the apparent semi-diameter.
    fn geometric_altitude(&self, body: Body, jd: f64, observer: Observer) -> (f64, f64, f64) {
        let ecl = self.ecliptic(body, jd);
        let (ra, dec) = ecliptic_to_equatorial(ecl.longitude, ecl.latitude, obliquity(jd));
        let (alt, az) = equatorial_to_horizontal(ra, dec, jd, observer.lat, observer.lng);
        let topo = parallax_in_altitude(alt, ecl.distance_km);
        let radius = match body {
            Body::Sun => SUN_RADIUS_KM,
            Body::Moon => MOON_RADIUS_KM,
        };
        let semi_diameter = (radius / ecl.distance_km).asin().to_degrees();
        (topo, az, semi_diameter)
    }

    fn apparent_altitude(&self, body: Body, jd: f64, observer: Observer) -> f64 {
        let (alt, _, _) = self.geometric_altitude(body, jd, observer);
        alt + refraction(alt)
    }

    fn phase_at(&self, jd: f64) -> f64 {
        let moon = self.ecliptic(Body::Moon, jd);
        let sun = self.ecliptic(Body::Sun, jd);
        normalize_degrees(moon.longitude - sun.longitude)
    }
}

fn check_observer(observer: Observer) -> Result<(), EphemerisError> {
    let valid = observer.lat.is_finite()
        && observer.lng.is_finite()
        && (-90.0..=90.0).contains(&observer.lat);
    if valid {
        Ok(())
    } else {
        Err(EphemerisError::InvalidObserver {
            lat: observer.lat,
            lng: observer.lng,
        })
    }
}

fn found(jd: Option<f64>) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    jd.map(coords::from_julian_day).transpose()
}

impl Ephemeris for MeeusEphemeris {
    fn topocentric_position(
        &self,
        body: Body,
        at: DateTime<Utc>,
        observer: Observer,
    ) -> Result<Horizontal, EphemerisError> {
        check_observer(observer)?;
        let (alt, azimuth, _) = self.geometric_altitude(body, julian_day(at), observer);
        Ok(Horizontal {
            altitude: alt + refraction(alt),
            azimuth,
        })
    }

    fn search_rise_set(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        check_observer(observer)?;
        // Upper limb touching the refracted horizon.
        let f = |jd: f64| {
            let (alt, _, sd) = self.geometric_altitude(body, jd, observer);
            Ok(alt + HORIZON_REFRACTION + sd)
        };
        found(find_crossing(f, julian_day(start), window_days, direction, Scan::ALTITUDE)?)
    }

    fn search_altitude(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        window_days: f64,
        target_altitude: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        check_observer(observer)?;
        let f = |jd: f64| Ok(self.apparent_altitude(body, jd, observer) - target_altitude);
        found(find_crossing(f, julian_day(start), window_days, direction, Scan::ALTITUDE)?)
    }

    fn search_lunar_phase(
        &self,
        target_phase: f64,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        let f = |jd: f64| Ok(signed_degrees(self.phase_at(jd) - target_phase));
        found(find_crossing(f, julian_day(start), window_days, Direction::Rising, Scan::PHASE)?)
    }

    fn angular_separation(
        &self,
        a: Body,
        b: Body,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        let jd = julian_day(at);
        let (p, q) = (self.ecliptic(a, jd), self.ecliptic(b, jd));
        Ok(coords::separation(p.longitude, p.latitude, q.longitude, q.latitude))
    }

    fn illumination(&self, body: Body, at: DateTime<Utc>) -> Result<Illumination, EphemerisError> {
        let jd = julian_day(at);
        let target = self.ecliptic(body, jd);
        let fraction = match body {
            Body::Sun => 1.0,
            Body::Moon => {
                let sun = self.ecliptic(Body::Sun, jd);
                let psi = coords::separation(
                    target.longitude,
                    target.latitude,
                    sun.longitude,
                    sun.latitude,
                )
                .to_radians();
                let phase_angle = (sun.distance_km * psi.sin())
                    .atan2(target.distance_km - sun.distance_km * psi.cos());
                (1.0 + phase_angle.cos()) / 2.0
            }
        };
        Ok(Illumination {
            geo_dist_au: target.distance_km / AU_KM,
            fraction,
        })
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(self.phase_at(julian_day(at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn moon_reference_position() {
        // 1992-04-12 0h TD: 133.1627, -3.2291, 368409.7 km (plus nutation ~0.005)
        let m = MeeusEphemeris.ecliptic(Body::Moon, 2_448_724.5);
        assert!((m.longitude - 133.165).abs() < 0.01, "{}", m.longitude);
        assert!((m.latitude + 3.229).abs() < 0.01, "{}", m.latitude);
        assert!((m.distance_km - 368_409.7).abs() < 20.0, "{}", m.distance_km);
    }

    #[test]
    fn finds_total_eclipse_new_moon() {
        // 2024-04-08 18:21 UTC
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let nm = MeeusEphemeris
            .search_lunar_phase(0.0, start, 35.0)
            .unwrap()
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 4, 8, 18, 21, 0).unwrap();
        assert!((nm - expected).num_minutes().abs() < 15, "{nm}");
    }

    #[test]
    fn phase_search_respects_window() {
        let start = Utc.with_ymd_and_hms(2024, 4, 10, 0, 0, 0).unwrap();
        assert_eq!(MeeusEphemeris.search_lunar_phase(0.0, start, 5.0).unwrap(), None);
    }

    #[test]
    fn equinox_sunset_on_the_equator() {
        let obs = Observer::new(0.0, 0.0);
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let set = MeeusEphemeris
            .search_rise_set(Body::Sun, obs, Direction::Setting, start, 1.0)
            .unwrap()
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 20, 18, 9, 0).unwrap();
        assert!((set - expected).num_minutes().abs() < 10, "{set}");

        let dusk = MeeusEphemeris
            .search_altitude(Body::Sun, obs, Direction::Setting, set, 1.0, -1.0)
            .unwrap()
            .unwrap();
        let lag = dusk - set;
        assert!(lag > Duration::zero() && lag < Duration::minutes(10), "{lag}");
    }

    #[test]
    fn midnight_sun_has_no_sunset() {
        let obs = Observer::new(80.0, 0.0);
        let start = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        assert_eq!(
            MeeusEphemeris
                .search_rise_set(Body::Sun, obs, Direction::Setting, start, 1.0)
                .unwrap(),
            None
        );
    }

    #[test]
    fn full_moon_is_fully_lit() {
        // 2024-04-23 23:49 UTC
        let at = Utc.with_ymd_and_hms(2024, 4, 23, 23, 49, 0).unwrap();
        let illum = MeeusEphemeris.illumination(Body::Moon, at).unwrap();
        assert!(illum.fraction > 0.99, "{}", illum.fraction);
        assert!(illum.geo_dist_au > 0.0023 && illum.geo_dist_au < 0.0028);
        let phase = MeeusEphemeris.moon_phase(at).unwrap();
        assert!((phase - 180.0).abs() < 1.0, "{phase}");
    }

    #[test]
    fn rejects_off_globe_observer() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            MeeusEphemeris.topocentric_position(Body::Sun, at, Observer::new(95.0, 0.0)),
            Err(EphemerisError::InvalidObserver { .. })
        ));
    }
}
