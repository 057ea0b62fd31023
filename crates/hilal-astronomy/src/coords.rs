//! Time scales and coordinate transforms.
//!
//! Angles are degrees unless a name says otherwise. Universal time stands in
//! for dynamical time; the ~70 s difference is below the model's accuracy.

use chrono::{DateTime, Utc};

use crate::ephemeris::EphemerisError;

pub const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

pub fn julian_day(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

pub fn from_julian_day(jd: f64) -> Result<DateTime<Utc>, EphemerisError> {
    if !jd.is_finite() {
        return Err(EphemerisError::OutOfRange { jd });
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(EphemerisError::OutOfRange { jd });
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(EphemerisError::OutOfRange { jd })
}

/// Nutation in longitude and in obliquity, degrees.
pub fn nutation(jd: f64) -> (f64, f64) {
    let (dpsi, deps) = astro::nutation::nutation(jd);
    (dpsi.to_degrees(), deps.to_degrees())
}

pub fn normalize_degrees(x: f64) -> f64 {
    x.rem_euclid(360.0)
}

/// Wraps into (-180, 180].
pub fn signed_degrees(x: f64) -> f64 {
    let r = normalize_degrees(x);
    if r > 180.0 { r - 360.0 } else { r }
}

/// True obliquity of the ecliptic (IAU mean plus nutation).
pub fn obliquity(jd: f64) -> f64 {
    let (_, deps) = nutation(jd);
    astro::ecliptic::mn_oblq_IAU(jd).to_degrees() + deps
}

/// Greenwich mean sidereal time.
pub fn sidereal_time(jd: f64) -> f64 {
    normalize_degrees(astro::time::mn_sidr(jd).to_degrees())
}

/// Ecliptic (longitude, latitude) to equatorial (right ascension, declination).
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, obliquity: f64) -> (f64, f64) {
    let (l, b, e) = (lon.to_radians(), lat.to_radians(), obliquity.to_radians());
    let ra = astro::coords::asc_frm_ecl(l, b, e);
    let dec = astro::coords::dec_frm_ecl(l, b, e);
    (normalize_degrees(ra.to_degrees()), dec.to_degrees())
}

/// Geocentric horizontal (altitude, azimuth from north) for an observer.
///
/// Longitude is positive east.
pub fn equatorial_to_horizontal(ra: f64, dec: f64, jd: f64, lat: f64, lng: f64) -> (f64, f64) {
    let h = (sidereal_time(jd) + lng - ra).to_radians();
    let (phi, d) = (lat.to_radians(), dec.to_radians());
    let alt = astro::coords::alt_frm_eq(h, d, phi);
    // Measured westward from south.
    let az_south = astro::coords::az_frm_eq(h, d, phi);
    (alt.to_degrees(), normalize_degrees(az_south.to_degrees() + 180.0))
}

/// Horizontal parallax for a body at `distance_km`.
pub fn horizontal_parallax(distance_km: f64) -> f64 {
    (EARTH_EQUATORIAL_RADIUS_KM / distance_km).asin().to_degrees()
}

/// Converts a geocentric altitude to a topocentric one.
pub fn parallax_in_altitude(geocentric_alt: f64, distance_km: f64) -> f64 {
    let p = horizontal_parallax(distance_km).to_radians();
    let h = geocentric_alt.to_radians();
    geocentric_alt - (p.sin() * h.cos()).asin().to_degrees()
}

/// Atmospheric refraction to add to a geometric altitude.
///
/// Saemundsson-style formula; below -1 degree it tapers linearly to zero at the nadir.
pub fn refraction(altitude: f64) -> f64 {
    if !(-90.0..=90.0).contains(&altitude) {
        return 0.0;
    }
    let hd = altitude.max(-1.0);
    let mut r = 1.02 / (hd + 10.3 / (hd + 5.11)).to_radians().tan() / 60.0;
    if altitude < -1.0 {
        r *= (altitude + 90.0) / 89.0;
    }
    r
}

/// Great-circle separation of two ecliptic positions.
pub fn separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (b1, b2) = (lat1.to_radians(), lat2.to_radians());
    let dl = (lon1 - lon2).to_radians();
    let c = b1.sin() * b2.sin() + b1.cos() * b2.cos() * dl.cos();
    c.clamp(-1.0, 1.0).acos().to_degrees()
}
