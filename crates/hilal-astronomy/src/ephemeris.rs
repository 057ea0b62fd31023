//! The Ephemeris Provider seam.
//!
//! The visibility engine never computes positions itself; it asks an
//! [`Ephemeris`]. All searches take a bounded window so every call terminates.

use chrono::{DateTime, Utc};
use hilal_types::GridPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
}

/// Observer on the Earth's surface at sea level, degrees (east positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub lat: f64,
    pub lng: f64,
}

impl Observer {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<GridPoint> for Observer {
    fn from(p: GridPoint) -> Self {
        Self::new(p.lat, p.lng)
    }
}

/// Refraction-corrected topocentric horizontal coordinates, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub altitude: f64,
    /// Measured from north through east, [0, 360).
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Geocentric distance, astronomical units.
    pub geo_dist_au: f64,
    /// Illuminated fraction of the disc, [0, 1].
    pub fraction: f64,
}

/// Sense of an altitude crossing: rising (ascending) or setting (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Rising,
    Setting,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EphemerisError {
    /// The instant cannot be represented or is outside the model's range.
    #[error("instant out of range (JD {jd})")]
    OutOfRange { jd: f64 },

    /// Observer coordinates are not on the globe.
    #[error("invalid observer at lat {lat}, lng {lng}")]
    InvalidObserver { lat: f64, lng: f64 },

    /// Search window is not a finite positive number of days.
    #[error("invalid search window of {days} days")]
    InvalidWindow { days: f64 },

    /// Provider-specific failure.
    #[error("ephemeris failure: {0}")]
    Provider(String),
}

/// Astronomical positions and event searches.
pub trait Ephemeris: Send + Sync {
    /// Topocentric apparent altitude/azimuth, corrected for refraction.
    fn topocentric_position(
        &self,
        body: Body,
        at: DateTime<Utc>,
        observer: Observer,
    ) -> Result<Horizontal, EphemerisError>;

    /// First rise or set (upper limb, refraction-corrected) in `[start, start + window_days]`.
    fn search_rise_set(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError>;

    /// First time the body's apparent altitude crosses `target_altitude` in the given sense.
    fn search_altitude(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        window_days: f64,
        target_altitude: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError>;

    /// First time the lunar phase angle reaches `target_phase` degrees (0 = new moon).
    fn search_lunar_phase(
        &self,
        target_phase: f64,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError>;

    /// Geocentric angular separation between two bodies, degrees.
    fn angular_separation(
        &self,
        a: Body,
        b: Body,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError>;

    fn illumination(&self, body: Body, at: DateTime<Utc>) -> Result<Illumination, EphemerisError>;

    /// Lunar phase angle in [0, 360): Moon's minus Sun's ecliptic longitude.
    fn moon_phase(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError>;
}

impl<T: Ephemeris + ?Sized> Ephemeris for &T {
    fn topocentric_position(
        &self,
        body: Body,
        at: DateTime<Utc>,
        observer: Observer,
    ) -> Result<Horizontal, EphemerisError> {
        (**self).topocentric_position(body, at, observer)
    }

    fn search_rise_set(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        (**self).search_rise_set(body, observer, direction, start, window_days)
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
        (**self).search_altitude(body, observer, direction, start, window_days, target_altitude)
    }

    fn search_lunar_phase(
        &self,
        target_phase: f64,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        (**self).search_lunar_phase(target_phase, start, window_days)
    }

    fn angular_separation(
        &self,
        a: Body,
        b: Body,
        at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        (**self).angular_separation(a, b, at)
    }

    fn illumination(&self, body: Body, at: DateTime<Utc>) -> Result<Illumination, EphemerisError> {
        (**self).illumination(body, at)
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).moon_phase(at)
    }
}
