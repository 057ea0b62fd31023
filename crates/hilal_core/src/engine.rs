//! The composed engine: visibility grids, month sequences and Hijri dates.

use chrono::{DateTime, NaiveDate, Utc};
use hilal_astronomy::{
    Ephemeris, EphemerisError, MeeusEphemeris, VisibilityCalculator, VisibilityConfig,
};
use hilal_calendar::{HijriResolver, LocaleCalendar, UmmAlQuraCalendar};
use hilal_months::{MonthSequencer, SequencerConfig};
use hilal_types::{
    CrescentDirection, HijriDate, HilalError, IslamicMonthEntry, MapDay, VisibilityGrid,
};
use serde::Serialize;
use tracing::debug;

/// One of the three maps of a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub day: MapDay,
    pub date: NaiveDate,
    pub grid: VisibilityGrid,
}

/// Stateless facade over an [`Ephemeris`] and a [`LocaleCalendar`].
///
/// Holds only configuration; every call recomputes. Callers own caching.
#[derive(Debug, Clone)]
pub struct HilalEngine<E = MeeusEphemeris, L = UmmAlQuraCalendar> {
    ephemeris: E,
    calendar: L,
    visibility: VisibilityConfig,
    sequencer: SequencerConfig,
}

impl Default for HilalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HilalEngine {
    /// Bundled analytic ephemeris with Umm al-Qura naming.
    pub fn new() -> Self {
        Self::with_providers(MeeusEphemeris, UmmAlQuraCalendar)
    }
}

impl<E: Ephemeris, L: LocaleCalendar> HilalEngine<E, L> {
    pub fn with_providers(ephemeris: E, calendar: L) -> Self {
        Self {
            ephemeris,
            calendar,
            visibility: VisibilityConfig::default(),
            sequencer: SequencerConfig::default(),
        }
    }

    pub fn visibility_config(mut self, config: VisibilityConfig) -> Self {
        self.visibility = config;
        self
    }

    pub fn sequencer_config(mut self, config: SequencerConfig) -> Self {
        self.sequencer = config;
        self
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn calendar(&self) -> &L {
        &self.calendar
    }

    fn calculator(&self) -> VisibilityCalculator<&E> {
        VisibilityCalculator::new(&self.ephemeris, self.visibility)
    }

    fn month_sequencer(&self) -> MonthSequencer<&E, &L> {
        MonthSequencer::new(&self.ephemeris, &self.calendar, self.sequencer)
    }

    /// Grid at the configured resolution.
    pub fn visibility_grid(
        &self,
        date: NaiveDate,
        direction: CrescentDirection,
    ) -> Result<VisibilityGrid, HilalError> {
        self.calculator().grid(date, direction)
    }

    pub fn visibility_grid_at(
        &self,
        date: NaiveDate,
        direction: CrescentDirection,
        resolution: f64,
    ) -> Result<VisibilityGrid, HilalError> {
        self.calculator().grid_at(date, direction, resolution)
    }

    /// `count` consecutive months starting at or before `from`.
    pub fn upcoming_months(
        &self,
        from: NaiveDate,
        count: usize,
    ) -> Result<Vec<IslamicMonthEntry>, HilalError> {
        self.month_sequencer().months(from, count)
    }

    /// Grids for an entry's three map dates, in map-day order.
    #[tracing::instrument(level = "debug", skip(self, entry), fields(month = %entry.label()))]
    pub fn month_grids(
        &self,
        entry: &IslamicMonthEntry,
        direction: CrescentDirection,
    ) -> Result<Vec<MonthGrid>, HilalError> {
        let calc = self.calculator();
        entry
            .map_days()
            .map(|(day, date)| {
                debug!(%day, %date, "computing month map");
                Ok(MonthGrid {
                    day,
                    date,
                    grid: calc.grid(date, direction)?,
                })
            })
            .collect()
    }

    /// Waxing while the Moon's phase angle is under 180 degrees.
    pub fn crescent_direction(
        &self,
        at: DateTime<Utc>,
    ) -> Result<CrescentDirection, EphemerisError> {
        self.calculator().crescent_direction(at)
    }

    /// Hijri date through the locale calendar, falling back to the tabular one.
    pub fn hijri_date(&self, date: NaiveDate) -> HijriDate {
        HijriResolver::new(&self.calendar).resolve(date)
    }
}
