//! Deterministic ephemeris for grid tests.

use chrono::{DateTime, Duration, Utc};
use hilal_astronomy::{
    Body, Direction, Ephemeris, EphemerisError, Horizontal, Illumination, Observer,
};

/// Sun rises and sets six hours after the search start except poleward of 60
/// degrees, where it never does. Searched from half a day before the Sun
/// event, the Moon sets 90 minutes after sunset and rises 90 minutes before
/// sunrise. Moon altitude is `lng / 10`, so the western hemisphere always has
/// the Moon below the horizon. Longitudes in (100, 110) make the position
/// query fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEphemeris {
    /// The twilight altitude is never reached.
    pub no_twilight: bool,
    /// Illumination queries fail.
    pub no_illumination: bool,
}

impl MockEphemeris {
    pub fn without_twilight() -> Self {
        Self {
            no_twilight: true,
            ..Self::default()
        }
    }

    pub fn without_illumination() -> Self {
        Self {
            no_illumination: true,
            ..Self::default()
        }
    }
}

impl Ephemeris for MockEphemeris {
    fn topocentric_position(
        &self,
        body: Body,
        _at: DateTime<Utc>,
        observer: Observer,
    ) -> Result<Horizontal, EphemerisError> {
        if observer.lng > 100.0 && observer.lng < 110.0 {
            return Err(EphemerisError::Provider("mock outage".into()));
        }
        let altitude = match body {
            Body::Sun => -1.0,
            Body::Moon => observer.lng / 10.0,
        };
        Ok(Horizontal {
            altitude,
            azimuth: 270.0,
        })
    }

    fn search_rise_set(
        &self,
        body: Body,
        observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        _window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        if observer.lat.abs() >= 60.0 {
            return Ok(None);
        }
        let after = match (body, direction) {
            (Body::Sun, _) => Duration::hours(6),
            (Body::Moon, Direction::Setting) => Duration::minutes(13 * 60 + 30),
            (Body::Moon, Direction::Rising) => Duration::minutes(10 * 60 + 30),
        };
        Ok(Some(start + after))
    }

    fn search_altitude(
        &self,
        _body: Body,
        _observer: Observer,
        direction: Direction,
        start: DateTime<Utc>,
        _window_days: f64,
        _target_altitude: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        if self.no_twilight {
            return Ok(None);
        }
        Ok(Some(match direction {
            Direction::Setting => start + Duration::minutes(5),
            Direction::Rising => start + Duration::hours(12) - Duration::minutes(5),
        }))
    }

    fn search_lunar_phase(
        &self,
        _target_phase: f64,
        start: DateTime<Utc>,
        window_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        Ok((window_days >= 10.0).then(|| start + Duration::days(10)))
    }

    fn angular_separation(
        &self,
        _a: Body,
        _b: Body,
        _at: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        Ok(12.0)
    }

    fn illumination(
        &self,
        _body: Body,
        _at: DateTime<Utc>,
    ) -> Result<Illumination, EphemerisError> {
        if self.no_illumination {
            return Err(EphemerisError::Provider("illumination unavailable".into()));
        }
        Ok(Illumination {
            geo_dist_au: 0.00257,
            fraction: 0.01,
        })
    }

    fn moon_phase(&self, _at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(90.0)
    }
}
