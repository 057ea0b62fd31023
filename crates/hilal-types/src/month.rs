use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve months of the Islamic year, in calendar order.
///
/// Serialized as the canonical transliterated name (e.g. `"Rabi' al-Awwal"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IslamicMonth {
    #[serde(rename = "Muharram")]
    Muharram,
    #[serde(rename = "Safar")]
    Safar,
    #[serde(rename = "Rabi' al-Awwal")]
    RabiAlAwwal,
    #[serde(rename = "Rabi' al-Thani")]
    RabiAlThani,
    #[serde(rename = "Jumada al-Ula")]
    JumadaAlUla,
    #[serde(rename = "Jumada al-Thani")]
    JumadaAlThani,
    #[serde(rename = "Rajab")]
    Rajab,
    #[serde(rename = "Sha'ban")]
    Shaban,
    #[serde(rename = "Ramadan")]
    Ramadan,
    #[serde(rename = "Shawwal")]
    Shawwal,
    #[serde(rename = "Dhul Qi'dah")]
    DhulQidah,
    #[serde(rename = "Dhul Hijjah")]
    DhulHijjah,
}

impl IslamicMonth {
    /// All months, Muharram first.
    pub const ALL: [IslamicMonth; 12] = [
        IslamicMonth::Muharram,
        IslamicMonth::Safar,
        IslamicMonth::RabiAlAwwal,
        IslamicMonth::RabiAlThani,
        IslamicMonth::JumadaAlUla,
        IslamicMonth::JumadaAlThani,
        IslamicMonth::Rajab,
        IslamicMonth::Shaban,
        IslamicMonth::Ramadan,
        IslamicMonth::Shawwal,
        IslamicMonth::DhulQidah,
        IslamicMonth::DhulHijjah,
    ];

    /// Zero-based position in the year (Muharram = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month at a zero-based position. Indices past 11 are clamped.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(11)]
    }

    /// Canonical transliterated name.
    pub fn name(self) -> &'static str {
        match self {
            IslamicMonth::Muharram => "Muharram",
            IslamicMonth::Safar => "Safar",
            IslamicMonth::RabiAlAwwal => "Rabi' al-Awwal",
            IslamicMonth::RabiAlThani => "Rabi' al-Thani",
            IslamicMonth::JumadaAlUla => "Jumada al-Ula",
            IslamicMonth::JumadaAlThani => "Jumada al-Thani",
            IslamicMonth::Rajab => "Rajab",
            IslamicMonth::Shaban => "Sha'ban",
            IslamicMonth::Ramadan => "Ramadan",
            IslamicMonth::Shawwal => "Shawwal",
            IslamicMonth::DhulQidah => "Dhul Qi'dah",
            IslamicMonth::DhulHijjah => "Dhul Hijjah",
        }
    }

    /// The following month, and whether the year rolled over (Dhul Hijjah -> Muharram).
    pub fn succ(self) -> (Self, bool) {
        let next = (self.index() + 1) % 12;
        (Self::from_index(next), next == 0)
    }
}

impl fmt::Display for IslamicMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Hijri calendar date. Derived value, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub month: IslamicMonth,
    pub year: i32,
    /// Day of month, 1-based.
    pub day: u32,
}

impl HijriDate {
    pub fn new(month: IslamicMonth, year: i32, day: u32) -> Self {
        Self { month, year, day }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month, self.year)
    }
}

/// Which of the three observation evenings of a month a map belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapDay {
    /// Calendar day of the conjunction.
    Conjunction,
    PlusOne,
    PlusTwo,
}

impl MapDay {
    pub const ALL: [MapDay; 3] = [MapDay::Conjunction, MapDay::PlusOne, MapDay::PlusTwo];

    pub fn label(self) -> &'static str {
        match self {
            MapDay::Conjunction => "New Moon Day (Conjunction)",
            MapDay::PlusOne => "+1 Day After New Moon",
            MapDay::PlusTwo => "+2 Days After New Moon",
        }
    }
}

impl fmt::Display for MapDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One lunar month produced by the month sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IslamicMonthEntry {
    pub name: IslamicMonth,
    pub year: i32,
    /// Gregorian month and year of the conjunction, e.g. "March 2026".
    pub gregorian_label: String,
    /// Instant of the astronomical new moon.
    pub new_moon: DateTime<Utc>,
    /// Conjunction day, +1 and +2, as calendar days.
    pub map_dates: [NaiveDate; 3],
    pub route_slug: String,
}

impl IslamicMonthEntry {
    /// Display label, e.g. "Ramadan 1447 AH".
    pub fn label(&self) -> String {
        format!("{} {} AH", self.name, self.year)
    }

    /// Deep-link path, e.g. "/1447AH/Ramadan".
    pub fn route_path(&self) -> String {
        format!("/{}AH/{}", self.year, self.route_slug)
    }

    /// Map dates paired with their day tag.
    pub fn map_days(&self) -> impl Iterator<Item = (MapDay, NaiveDate)> + '_ {
        MapDay::ALL.into_iter().zip(self.map_dates)
    }
}
