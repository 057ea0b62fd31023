//! Per-point crescent assessment and whole-grid evaluation.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use hilal_types::{
    CrescentDirection, GridPoint, HilalError, VisibilityCategory, VisibilityGrid, VisibilityResult,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::config::{BestTimePolicy, GridSpec, VisibilityConfig};
use crate::ephemeris::{Body, Direction, Ephemeris, EphemerisError, Observer};
use crate::yallop::{Q_MOON_BELOW_HORIZON, classify, crescent_width, yallop_q};

/// Window for the anchor sunset/sunrise search.
const ANCHOR_WINDOW_DAYS: f64 = 1.0;
/// Window for the best-time search on the dark side of the anchor.
const BEST_TIME_WINDOW_DAYS: f64 = 0.5;
const NEXT_NEW_MOON_WINDOW_DAYS: f64 = 35.0;

/// New moons on either side of the evaluated date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewMoonBracket {
    pub previous: Option<DateTime<Utc>>,
    pub next: Option<DateTime<Utc>>,
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn days(d: f64) -> Duration {
    Duration::milliseconds((d * 86_400_000.0).round() as i64)
}

fn scaled(d: Duration, factor: f64) -> Duration {
    Duration::milliseconds((d.num_milliseconds() as f64 * factor).round() as i64)
}

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

/// Evaluates Yallop visibility over the global grid for one evening or morning.
///
/// Stateless: every call recomputes from the ephemeris.
#[derive(Debug, Clone, Default)]
pub struct VisibilityCalculator<E> {
    ephemeris: E,
    config: VisibilityConfig,
}

impl<E: Ephemeris> VisibilityCalculator<E> {
    pub fn new(ephemeris: E, config: VisibilityConfig) -> Self {
        Self { ephemeris, config }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Grid at the configured resolution.
    pub fn grid(
        &self,
        date: NaiveDate,
        direction: CrescentDirection,
    ) -> Result<VisibilityGrid, HilalError> {
        self.grid_at(date, direction, self.config.resolution)
    }

    /// Grid at an explicit resolution. Points that cannot be evaluated degrade to E.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn grid_at(
        &self,
        date: NaiveDate,
        direction: CrescentDirection,
        resolution: f64,
    ) -> Result<VisibilityGrid, HilalError> {
        let spec = GridSpec::new(resolution)?;
        self.config.thresholds.validate()?;
        self.config.best_time.validate()?;

        let bracket = self.bracket(date);
        let points = spec.points();

        #[cfg(feature = "parallel")]
        let results: Vec<VisibilityResult> = points
            .par_iter()
            .map(|&p| self.point(p, date, direction, bracket))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<VisibilityResult> = points
            .iter()
            .map(|&p| self.point(p, date, direction, bracket))
            .collect();

        debug!(points = results.len(), "grid evaluated");
        Ok(VisibilityGrid::new(
            results,
            date,
            bracket.previous,
            bracket.next,
            resolution,
            direction,
        ))
    }

    /// Assesses one location. Never fails; see [`VisibilityResult::is_degraded`].
    pub fn point(
        &self,
        point: GridPoint,
        date: NaiveDate,
        direction: CrescentDirection,
        bracket: NewMoonBracket,
    ) -> VisibilityResult {
        match self.evaluate(point, date, direction, bracket) {
            Ok(Some(result)) => result,
            Ok(None) => VisibilityResult::degraded(point),
            Err(error) => {
                debug!(lat = point.lat, lng = point.lng, %error, "grid point degraded");
                VisibilityResult::degraded(point)
            }
        }
    }

    fn evaluate(
        &self,
        point: GridPoint,
        date: NaiveDate,
        direction: CrescentDirection,
        bracket: NewMoonBracket,
    ) -> Result<Option<VisibilityResult>, EphemerisError> {
        let observer = Observer::from(point);
        let Some(at) = self.observation_time(observer, date, direction)? else {
            return Ok(None);
        };

        let moon = self.ephemeris.topocentric_position(Body::Moon, at, observer)?;
        let sun = self.ephemeris.topocentric_position(Body::Sun, at, observer)?;
        let arcv = moon.altitude - sun.altitude;
        let moon_age = match direction {
            CrescentDirection::Waxing => bracket.previous.map(|nm| hours_between(nm, at)),
            CrescentDirection::Waning => bracket.next.map(|nm| hours_between(at, nm)),
        };

        if moon.altitude < 0.0 {
            return Ok(Some(VisibilityResult {
                point,
                category: VisibilityCategory::E,
                arcv,
                crescent_width: 0.0,
                q: Q_MOON_BELOW_HORIZON,
                observation_time: Some(at),
                moon_altitude: moon.altitude,
                moon_age,
            }));
        }

        let elongation = self.ephemeris.angular_separation(Body::Moon, Body::Sun, at)?;
        let illumination = self.ephemeris.illumination(Body::Moon, at)?;
        let width = crescent_width(illumination.geo_dist_au, elongation);
        let q = yallop_q(arcv, width);

        Ok(Some(VisibilityResult {
            point,
            category: classify(moon.altitude, q, &self.config.thresholds),
            arcv,
            crescent_width: width,
            q,
            observation_time: Some(at),
            moon_altitude: moon.altitude,
            moon_age,
        }))
    }

    /// Best observation instant, or `None` when the anchor or best-time event does not occur.
    pub fn observation_time(
        &self,
        observer: Observer,
        date: NaiveDate,
        direction: CrescentDirection,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        // Whole-hour zone approximation from longitude.
        let offset = Duration::hours((observer.lng / 15.0).round() as i64);
        let eph = &self.ephemeris;

        match direction {
            CrescentDirection::Waxing => {
                let local_noon = day_start(date) + Duration::hours(12) - offset;
                let Some(sunset) = eph.search_rise_set(
                    Body::Sun,
                    observer,
                    Direction::Setting,
                    local_noon,
                    ANCHOR_WINDOW_DAYS,
                )?
                else {
                    return Ok(None);
                };
                match self.config.best_time {
                    BestTimePolicy::SunAltitude { degrees } => eph.search_altitude(
                        Body::Sun,
                        observer,
                        Direction::Setting,
                        sunset,
                        BEST_TIME_WINDOW_DAYS,
                        degrees,
                    ),
                    BestTimePolicy::LagFraction { fraction } => {
                        let Some(moonset) = eph.search_rise_set(
                            Body::Moon,
                            observer,
                            Direction::Setting,
                            sunset - days(0.5),
                            ANCHOR_WINDOW_DAYS,
                        )?
                        else {
                            return Ok(None);
                        };
                        let lag = (moonset - sunset).max(Duration::zero());
                        Ok(Some(sunset + scaled(lag, fraction)))
                    }
                }
            }
            CrescentDirection::Waning => {
                let local_midnight = day_start(date) - offset;
                let Some(sunrise) = eph.search_rise_set(
                    Body::Sun,
                    observer,
                    Direction::Rising,
                    local_midnight,
                    ANCHOR_WINDOW_DAYS,
                )?
                else {
                    return Ok(None);
                };
                match self.config.best_time {
                    BestTimePolicy::SunAltitude { degrees } => eph.search_altitude(
                        Body::Sun,
                        observer,
                        Direction::Rising,
                        sunrise - days(BEST_TIME_WINDOW_DAYS),
                        BEST_TIME_WINDOW_DAYS,
                        degrees,
                    ),
                    BestTimePolicy::LagFraction { fraction } => {
                        let Some(moonrise) = eph.search_rise_set(
                            Body::Moon,
                            observer,
                            Direction::Rising,
                            sunrise - days(0.5),
                            ANCHOR_WINDOW_DAYS,
                        )?
                        else {
                            return Ok(None);
                        };
                        let lag = (sunrise - moonrise).max(Duration::zero());
                        Ok(Some(sunrise - scaled(lag, fraction)))
                    }
                }
            }
        }
    }

    /// Latest conjunction at or before the end of `date`, UTC.
    pub fn previous_new_moon(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        let end_of_day = day_start(date) + Duration::days(1);
        let Some(first) =
            self.ephemeris
                .search_lunar_phase(0.0, end_of_day - Duration::days(45), 46.0)?
        else {
            return Ok(None);
        };
        if first > end_of_day {
            return Ok(None);
        }
        // At most two conjunctions fit in the 45-day span.
        let second = self
            .ephemeris
            .search_lunar_phase(0.0, first + Duration::days(2), 30.0)?;
        Ok(Some(second.filter(|s| *s <= end_of_day).unwrap_or(first)))
    }

    /// First conjunction after the start of `date`, UTC.
    pub fn next_new_moon(&self, date: NaiveDate) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        self.ephemeris
            .search_lunar_phase(0.0, day_start(date), NEXT_NEW_MOON_WINDOW_DAYS)
    }

    /// Both bracketing new moons; search failures become `None`.
    pub fn bracket(&self, date: NaiveDate) -> NewMoonBracket {
        let previous = self.previous_new_moon(date).unwrap_or_else(|error| {
            debug!(%date, %error, "previous new moon unavailable");
            None
        });
        let next = self.next_new_moon(date).unwrap_or_else(|error| {
            debug!(%date, %error, "next new moon unavailable");
            None
        });
        NewMoonBracket { previous, next }
    }

    /// Waxing while the phase angle is below 180 degrees.
    pub fn crescent_direction(
        &self,
        at: DateTime<Utc>,
    ) -> Result<CrescentDirection, EphemerisError> {
        let phase = self.ephemeris.moon_phase(at)?;
        Ok(if phase < 180.0 {
            CrescentDirection::Waxing
        } else {
            CrescentDirection::Waning
        })
    }
}
