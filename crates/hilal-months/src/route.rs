//! Route slugs and month lookup for deep links.

use chrono::{DateTime, Utc};
use hilal_types::IslamicMonthEntry;
use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"['\s]").expect("separator pattern is valid"));
static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen pattern is valid"));

/// `"Dhul Qi'dah"` -> `"Dhul-Qi-dah"`, `"Rabi' al-Awwal"` -> `"Rabi-al-Awwal"`.
pub fn to_route_slug(name: &str) -> String {
    let dashed = SEPARATORS.replace_all(name, "-");
    HYPHEN_RUNS.replace_all(&dashed, "-").into_owned()
}

/// Entry for a route's year (`"1447"` or `"1447AH"`) and slug, compared case-insensitively.
pub fn find_month_by_route<'a>(
    year: &str,
    slug: &str,
    months: &'a [IslamicMonthEntry],
) -> Option<&'a IslamicMonthEntry> {
    let year: i32 = year.trim().trim_end_matches("AH").trim().parse().ok()?;
    months
        .iter()
        .find(|m| m.year == year && m.route_slug.eq_ignore_ascii_case(slug))
}

/// Entry whose new moon is closest to `now`; the earlier entry wins ties.
pub fn nearest_month(
    months: &[IslamicMonthEntry],
    now: DateTime<Utc>,
) -> Option<&IslamicMonthEntry> {
    let distance = |m: &IslamicMonthEntry| (m.new_moon - now).abs();
    let mut best = months.first()?;
    for m in &months[1..] {
        if distance(m) < distance(best) {
            best = m;
        }
    }
    Some(best)
}

/// Route path of [`nearest_month`].
pub fn nearest_month_route(months: &[IslamicMonthEntry], now: DateTime<Utc>) -> Option<String> {
    nearest_month(months, now).map(IslamicMonthEntry::route_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use hilal_types::IslamicMonth;

    fn entry(name: IslamicMonth, year: i32, new_moon: DateTime<Utc>) -> IslamicMonthEntry {
        let day = new_moon.date_naive();
        IslamicMonthEntry {
            name,
            year,
            gregorian_label: new_moon.format("%B %Y").to_string(),
            new_moon,
            map_dates: [day, day + Duration::days(1), day + Duration::days(2)],
            route_slug: to_route_slug(name.name()),
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(to_route_slug("Dhul Qi'dah"), "Dhul-Qi-dah");
        assert_eq!(to_route_slug("Rabi' al-Awwal"), "Rabi-al-Awwal");
        assert_eq!(to_route_slug("Sha'ban"), "Sha-ban");
        assert_eq!(to_route_slug("Ramadan"), "Ramadan");
    }

    #[test]
    fn route_lookup_accepts_ah_suffix_and_any_case() {
        let nm = Utc.with_ymd_and_hms(2026, 2, 17, 12, 1, 0).unwrap();
        let months = vec![entry(IslamicMonth::Ramadan, 1447, nm)];
        assert!(find_month_by_route("1447AH", "ramadan", &months).is_some());
        assert!(find_month_by_route("1447", "RAMADAN", &months).is_some());
        assert!(find_month_by_route("1446AH", "Ramadan", &months).is_none());
        assert!(find_month_by_route("AH", "Ramadan", &months).is_none());
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let a = Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap();
        let b = a + Duration::days(30);
        let months = vec![
            entry(IslamicMonth::Shaban, 1447, a),
            entry(IslamicMonth::Ramadan, 1447, b),
        ];
        let now = a + Duration::days(15);
        assert_eq!(nearest_month_route(&months, now).unwrap(), "/1447AH/Sha-ban");
        assert_eq!(
            nearest_month_route(&months, now + Duration::seconds(1)).unwrap(),
            "/1447AH/Ramadan"
        );
    }

    #[test]
    fn empty_sequence_has_no_nearest() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(nearest_month_route(&[], now), None);
    }
}
