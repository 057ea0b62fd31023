use chrono::NaiveDate;
use hilal_types::HijriDate;
use tracing::debug;

use crate::locale::{LocaleCalendar, UmmAlQuraCalendar};
use crate::normalize::normalize_month_name;
use crate::tabular::tabular_hijri;

/// Best-effort Hijri date for a civil day.
///
/// Prefers the wrapped locale calendar and falls back to the tabular
/// algorithm when the service is unavailable, fails, reports a zero year or
/// day, or reports a month name that is not an Islamic month. Never fails.
#[derive(Debug, Clone, Default)]
pub struct HijriResolver<L> {
    calendar: L,
}

impl<L: LocaleCalendar> HijriResolver<L> {
    pub fn new(calendar: L) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &L {
        &self.calendar
    }

    pub fn resolve(&self, date: NaiveDate) -> HijriDate {
        match self.calendar.hijri_date(date) {
            Ok(local) => {
                match normalize_month_name(&local.month_name) {
                    Some(month) if local.year != 0 && local.day != 0 => {
                        return HijriDate::new(month, local.year, local.day);
                    }
                    _ => debug!(
                        %date,
                        month_name = %local.month_name,
                        year = local.year,
                        day = local.day,
                        "locale calendar answer rejected, using tabular calendar"
                    ),
                }
            }
            Err(error) => {
                debug!(%date, %error, "locale calendar unavailable, using tabular calendar")
            }
        }
        tabular_hijri(date)
    }
}

/// Resolves a civil date against the bundled Umm al-Qura tables.
pub fn resolve_hijri(date: NaiveDate) -> HijriDate {
    HijriResolver::new(UmmAlQuraCalendar).resolve(date)
}
