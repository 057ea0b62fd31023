//! Locale calendar services: the optional high-fidelity source of Hijri dates.

use chrono::{Datelike, NaiveDate};
use hijri_date::HijriDate as UmmAlQuraDate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use thiserror::Error;

/// Minimum Gregorian year covered by the Umm al-Qura tables.
pub const UMM_AL_QURA_MIN_YEAR: i32 = 1938;
/// Maximum Gregorian year covered by the Umm al-Qura tables.
pub const UMM_AL_QURA_MAX_YEAR: i32 = 2076;

/// English month names as a CLDR-backed locale reports them for the Islamic calendar.
const CLDR_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabiʻ I",
    "Rabiʻ II",
    "Jumada I",
    "Jumada II",
    "Rajab",
    "Shaʻban",
    "Ramadan",
    "Shawwal",
    "Dhuʻl-Qiʻdah",
    "Dhuʻl-Hijjah",
];

/// Hijri date as reported by a locale calendar, before normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleHijriDate {
    pub month_name: String,
    pub year: i32,
    pub day: u32,
}

/// Failure of a locale calendar service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleCalendarError {
    /// The service has no data for this date (or does not exist at all).
    #[error("no locale calendar data for {date}")]
    Unavailable { date: NaiveDate },

    /// The service raised an error.
    #[error("locale calendar failed: {0}")]
    Failed(String),
}

/// Best-effort source of Umm al-Qura Hijri dates.
///
/// Implementations may fail freely; callers fall back to the tabular calendar.
pub trait LocaleCalendar: std::fmt::Debug + Send + Sync {
    fn hijri_date(&self, date: NaiveDate) -> Result<LocaleHijriDate, LocaleCalendarError>;
}

impl<T: LocaleCalendar + ?Sized> LocaleCalendar for &T {
    fn hijri_date(&self, date: NaiveDate) -> Result<LocaleHijriDate, LocaleCalendarError> {
        (**self).hijri_date(date)
    }
}

impl<T: LocaleCalendar + ?Sized> LocaleCalendar for Box<T> {
    fn hijri_date(&self, date: NaiveDate) -> Result<LocaleHijriDate, LocaleCalendarError> {
        (**self).hijri_date(date)
    }
}

/// No locale calendar: every lookup is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocaleCalendar;

impl LocaleCalendar for NoLocaleCalendar {
    fn hijri_date(&self, date: NaiveDate) -> Result<LocaleHijriDate, LocaleCalendarError> {
        Err(LocaleCalendarError::Unavailable { date })
    }
}

// Thread-local cache: gregorian -> (hijri_year, month, day)
thread_local! {
    static UMM_AL_QURA_CACHE: RefCell<Option<(NaiveDate, usize, usize, usize)>> =
        const { RefCell::new(None) };
}

/// Umm al-Qura calendar backed by the `hijri_date` tables (Gregorian 1938-2076).
#[derive(Debug, Clone, Copy, Default)]
pub struct UmmAlQuraCalendar;

impl UmmAlQuraCalendar {
    fn lookup(date: NaiveDate) -> Result<(usize, usize, usize), LocaleCalendarError> {
        let cached = UMM_AL_QURA_CACHE.with(|cache| {
            cache
                .borrow()
                .as_ref()
                .and_then(|(d, y, m, day)| (*d == date).then_some((*y, *m, *day)))
        });
        if let Some(hit) = cached {
            return Ok(hit);
        }

        if date.year() < UMM_AL_QURA_MIN_YEAR || date.year() > UMM_AL_QURA_MAX_YEAR {
            return Err(LocaleCalendarError::Unavailable { date });
        }

        let hijri = UmmAlQuraDate::from_gr(
            date.year() as usize,
            date.month() as usize,
            date.day() as usize,
        )
        .map_err(|_| LocaleCalendarError::Failed(format!("no Umm al-Qura date for {date}")))?;

        let ymd = (hijri.year(), hijri.month(), hijri.day());
        UMM_AL_QURA_CACHE.with(|cache| {
            *cache.borrow_mut() = Some((date, ymd.0, ymd.1, ymd.2));
        });
        Ok(ymd)
    }
}

impl LocaleCalendar for UmmAlQuraCalendar {
    fn hijri_date(&self, date: NaiveDate) -> Result<LocaleHijriDate, LocaleCalendarError> {
        let (year, month, day) = Self::lookup(date)?;
        let month_name = month
            .checked_sub(1)
            .and_then(|i| CLDR_MONTH_NAMES.get(i))
            .ok_or_else(|| LocaleCalendarError::Failed(format!("month {month} out of range")))?;
        Ok(LocaleHijriDate {
            month_name: (*month_name).to_string(),
            year: i32::try_from(year)
                .map_err(|_| LocaleCalendarError::Failed(format!("year {year} out of range")))?,
            day: u32::try_from(day)
                .map_err(|_| LocaleCalendarError::Failed(format!("day {day} out of range")))?,
        })
    }
}
