//! Hijri calendar resolution.
//!
//! [`HijriResolver`] asks a [`LocaleCalendar`] (by default the Umm al-Qura
//! tables) for the Hijri date of a civil day and falls back to the tabular
//! ("Kuwaiti") arithmetic of [`tabular_hijri`] whenever that service is
//! missing, fails, or answers with something that is not an Islamic month.

pub mod locale;
pub mod normalize;
pub mod resolver;
pub mod tabular;

pub use locale::{
    LocaleCalendar, LocaleCalendarError, LocaleHijriDate, NoLocaleCalendar, UmmAlQuraCalendar,
};
pub use normalize::normalize_month_name;
pub use resolver::{HijriResolver, resolve_hijri};
pub use tabular::{julian_day_number, tabular_hijri};

use chrono::NaiveDate;
use hilal_types::HilalError;

/// Parses a civil date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `InvalidDate` for anything that is not a real Gregorian date.
pub fn parse_civil_date(input: &str) -> Result<NaiveDate, HilalError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| HilalError::invalid_date(input, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_civil_date(" 2026-02-17 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            parse_civil_date("2026-02-30"),
            Err(HilalError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_civil_date("next tuesday"),
            Err(HilalError::InvalidDate { .. })
        ));
    }
}
