//! Consecutive Islamic months from astronomical new moons.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use hilal_astronomy::Ephemeris;
use hilal_calendar::{HijriResolver, LocaleCalendar};
use hilal_types::{HilalError, IslamicMonth, IslamicMonthEntry};
use tracing::debug;

use crate::route::to_route_slug;

/// Gap left after each conjunction so the next search cannot find it again.
const CURSOR_ADVANCE_DAYS: i64 = 2;
/// How far before the start date the walk begins.
const LOOKBACK_DAYS: i64 = 30;

/// Sequencer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Offset defining the civil day of map dates and Gregorian labels.
    pub utc_offset: FixedOffset,
    /// Days after the conjunction day at which the first month is named (3..=5).
    pub naming_lookahead_days: i64,
    /// Window of each new-moon search.
    pub search_window_days: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            naming_lookahead_days: 5,
            search_window_days: 35.0,
        }
    }
}

impl SequencerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn naming_lookahead_days(mut self, days: i64) -> Self {
        self.naming_lookahead_days = days;
        self
    }

    pub fn search_window_days(mut self, days: f64) -> Self {
        self.search_window_days = days;
        self
    }

    pub fn validate(&self) -> Result<(), HilalError> {
        if !(3..=5).contains(&self.naming_lookahead_days) {
            return Err(HilalError::invalid_config(format!(
                "naming lookahead {} outside 3..=5 days",
                self.naming_lookahead_days
            )));
        }
        // Must exceed one synodic month or a conjunction can be skipped.
        if !self.search_window_days.is_finite() || self.search_window_days < 30.0 {
            return Err(HilalError::invalid_config(format!(
                "search window {} shorter than a lunation",
                self.search_window_days
            )));
        }
        Ok(())
    }
}

/// Successive new moons after a cursor.
///
/// Each search starts two days past the previous conjunction. Iteration ends
/// when a search finds nothing or the ephemeris fails.
#[derive(Debug, Clone)]
pub struct NewMoons<E> {
    ephemeris: E,
    cursor: Option<DateTime<Utc>>,
    window_days: f64,
}

impl<E: Ephemeris> NewMoons<E> {
    pub fn new(ephemeris: E, from: DateTime<Utc>, window_days: f64) -> Self {
        Self {
            ephemeris,
            cursor: Some(from),
            window_days,
        }
    }
}

impl<E: Ephemeris> Iterator for NewMoons<E> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        match self.ephemeris.search_lunar_phase(0.0, cursor, self.window_days) {
            Ok(Some(new_moon)) => {
                self.cursor = Some(new_moon + Duration::days(CURSOR_ADVANCE_DAYS));
                Some(new_moon)
            }
            Ok(None) => {
                debug!(%cursor, "no new moon in search window");
                None
            }
            Err(error) => {
                debug!(%cursor, %error, "new moon search failed");
                None
            }
        }
    }
}

/// Names consecutive lunar months.
#[derive(Debug, Clone)]
pub struct MonthSequencer<E, L> {
    ephemeris: E,
    resolver: HijriResolver<L>,
    config: SequencerConfig,
}

impl<E: Ephemeris, L: LocaleCalendar> MonthSequencer<E, L> {
    pub fn new(ephemeris: E, calendar: L, config: SequencerConfig) -> Self {
        Self {
            ephemeris,
            resolver: HijriResolver::new(calendar),
            config,
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &HijriResolver<L> {
        &self.resolver
    }

    /// Up to `count` months whose conjunctions follow `from` minus 30 days.
    ///
    /// Only the first month is named through the Hijri resolver; each later
    /// one is the successor of its predecessor. Fewer than `count` entries
    /// are returned if the ephemeris stops finding new moons.
    ///
    /// # Errors
    /// `InvalidCount` for `count == 0`, `InvalidConfiguration` for a bad config.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn months(
        &self,
        from: NaiveDate,
        count: usize,
    ) -> Result<Vec<IslamicMonthEntry>, HilalError> {
        if count == 0 {
            return Err(HilalError::InvalidCount { count });
        }
        self.config.validate()?;

        let offset = self.config.utc_offset;
        let start = local_midnight(from, offset) - Duration::days(LOOKBACK_DAYS);

        let mut months = Vec::with_capacity(count);
        let mut current: Option<(IslamicMonth, i32)> = None;
        for new_moon in NewMoons::new(&self.ephemeris, start, self.config.search_window_days)
            .take(count)
        {
            let local = new_moon.with_timezone(&offset);
            let day0 = local.date_naive();

            let (name, year) = match current {
                None => self.anchor(day0),
                Some((month, year)) => {
                    let (next, wrapped) = month.succ();
                    (next, year + i32::from(wrapped))
                }
            };
            current = Some((name, year));

            months.push(IslamicMonthEntry {
                name,
                year,
                gregorian_label: local.format("%B %Y").to_string(),
                new_moon,
                map_dates: [day0, day0 + Duration::days(1), day0 + Duration::days(2)],
                route_slug: to_route_slug(name.name()),
            });
        }
        Ok(months)
    }

    /// Month that begins with the conjunction on `day0`.
    fn anchor(&self, day0: NaiveDate) -> (IslamicMonth, i32) {
        let lookahead = day0 + Duration::days(self.config.naming_lookahead_days);
        let h = self.resolver.resolve(lookahead);
        // Past mid-month means the calendar has not rolled over yet.
        let (month, year) = if h.day > 15 {
            let (next, wrapped) = h.month.succ();
            (next, h.year + i32::from(wrapped))
        } else {
            (h.month, h.year)
        };
        debug!(%day0, %lookahead, resolved = %h, %month, year, "first month anchored");
        (month, year)
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
