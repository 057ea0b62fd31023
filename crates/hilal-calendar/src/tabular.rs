//! Tabular ("Kuwaiti") Islamic calendar.
//!
//! Pure integer arithmetic on the Julian Day Number. Agrees with the sighted
//! calendar to within about a day; used whenever no locale calendar answers.

use chrono::{Datelike, NaiveDate};
use hilal_types::{HijriDate, IslamicMonth};

/// Days in one 30-year tabular cycle.
const CYCLE_DAYS: i64 = 10631;

/// Julian Day Number (the JD at noon) of a civil date.
///
/// The Gregorian correction applies only after 1582-10-15; earlier dates are
/// treated as Julian.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
    let (yy, mm) = if m <= 2 { (y - 1, m + 12) } else { (y, m) };

    let gregorian = y > 1582 || (y == 1582 && m > 10) || (y == 1582 && m == 10 && d > 15);
    let correction = if gregorian {
        let a = yy.div_euclid(100);
        2 - a + a.div_euclid(4)
    } else {
        0
    };

    (1461 * (yy + 4716)).div_euclid(4) + (306_001 * (mm + 1)).div_euclid(10_000) + d + correction
        - 1524
}

/// Converts a civil date to the tabular Hijri calendar.
///
/// Never fails. The month is clamped into the 12-month range.
pub fn tabular_hijri(date: NaiveDate) -> HijriDate {
    let jdn = julian_day_number(date.year(), date.month(), date.day());

    let l = jdn - 1_948_440 + 10632;
    let n = (l - 1).div_euclid(CYCLE_DAYS);
    let r = l - CYCLE_DAYS * n + 354;
    let j = (10985 - r).div_euclid(5316) * (50 * r).div_euclid(17719)
        + r.div_euclid(5670) * (43 * r).div_euclid(15238);
    let l = r - (30 - j).div_euclid(15) * (17719 * j).div_euclid(50)
        - j.div_euclid(16) * (15238 * j).div_euclid(43)
        + 29;

    let month = (24 * l).div_euclid(709);
    let day = l - (709 * month).div_euclid(24);
    let year = 30 * n + j - 30;

    let index = (month - 1).clamp(0, 11) as usize;
    HijriDate::new(
        IslamicMonth::from_index(index),
        i32::try_from(year).unwrap_or(i32::MAX),
        u32::try_from(day.max(1)).unwrap_or(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn jdn_of_j2000() {
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
    }

    #[test]
    fn jdn_across_gregorian_reform() {
        // 1582-10-04 (Julian) is followed directly by 1582-10-15 (Gregorian).
        assert_eq!(julian_day_number(1582, 10, 4), 2_299_160);
        assert_eq!(julian_day_number(1582, 10, 16), 2_299_162);
    }

    #[test]
    fn first_of_ramadan_1445() {
        assert_eq!(
            tabular_hijri(date(2024, 3, 11)),
            HijriDate::new(IslamicMonth::Ramadan, 1445, 1)
        );
    }

    #[test]
    fn first_of_ramadan_1447_in_february() {
        assert_eq!(
            tabular_hijri(date(2026, 2, 18)),
            HijriDate::new(IslamicMonth::Ramadan, 1447, 1)
        );
    }

    #[test]
    fn new_year_1445() {
        assert_eq!(
            tabular_hijri(date(2023, 7, 19)),
            HijriDate::new(IslamicMonth::Muharram, 1445, 1)
        );
    }

    #[test]
    fn january_dates_are_not_shifted() {
        assert_eq!(
            tabular_hijri(date(2025, 1, 1)),
            HijriDate::new(IslamicMonth::Rajab, 1446, 1)
        );
    }

    #[test]
    fn deterministic() {
        let d = date(2031, 11, 5);
        assert_eq!(tabular_hijri(d), tabular_hijri(d));
    }
}
