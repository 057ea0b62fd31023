//! Crescent visibility maps and Islamic month sequencing.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use hilal_core::prelude::*;
//!
//! let engine = HilalEngine::new();
//! let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
//! let months = engine.upcoming_months(today, 3)?;
//! let ramadan = find_month_by_route("1447AH", "Ramadan", &months).unwrap();
//! for map in engine.month_grids(ramadan, CrescentDirection::Waxing)? {
//!     println!("{}: {} points visible", map.day, map.grid.counts().a);
//! }
//! # Ok::<(), HilalError>(())
//! ```

pub mod engine;
pub mod extension;

pub use engine::{HilalEngine, MonthGrid};
pub use extension::HilalDateExt;

pub use hilal_astronomy::{
    BestTimePolicy, Body, Direction, Ephemeris, EphemerisError, GridSpec, Horizontal,
    Illumination, MeeusEphemeris, Observer, Q_MOON_BELOW_HORIZON, VisibilityCalculator,
    VisibilityConfig, VisibilityConfigBuilder, YallopThresholds, crescent_width, yallop_q,
};
pub use hilal_calendar::{
    HijriResolver, LocaleCalendar, LocaleCalendarError, LocaleHijriDate, NoLocaleCalendar,
    UmmAlQuraCalendar, normalize_month_name, parse_civil_date, resolve_hijri, tabular_hijri,
};
pub use hilal_months::{
    MonthSequencer, NewMoons, SequencerConfig, find_month_by_route, nearest_month,
    nearest_month_route, to_route_slug,
};
pub use hilal_types::{
    CategoryCounts, CrescentDirection, GridPoint, HijriDate, HilalError, IslamicMonth,
    IslamicMonthEntry, MapDay, VisibilityCategory, VisibilityGrid, VisibilityResult,
};

pub mod prelude {
    pub use crate::{HilalDateExt, HilalEngine, MonthGrid};
    pub use crate::{find_month_by_route, nearest_month_route, parse_civil_date};
    pub use crate::{VisibilityConfig, YallopThresholds, BestTimePolicy, SequencerConfig};
    pub use hilal_types::*;
}

use chrono::NaiveDate;

/// Visibility grid with the default engine at `resolution` degrees.
pub fn visibility_grid(
    date: NaiveDate,
    direction: CrescentDirection,
    resolution: f64,
) -> Result<VisibilityGrid, HilalError> {
    HilalEngine::new().visibility_grid_at(date, direction, resolution)
}

/// `count` consecutive months with the default engine.
pub fn upcoming_months(
    from: NaiveDate,
    count: usize,
) -> Result<Vec<IslamicMonthEntry>, HilalError> {
    HilalEngine::new().upcoming_months(from, count)
}
