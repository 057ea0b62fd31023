use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed sample on the equirectangular visibility grid, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GridPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Which crescent is being looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrescentDirection {
    /// Young moon, looked for in the evening after sunset.
    Waxing,
    /// Old moon, looked for in the morning before sunrise.
    Waning,
}

impl fmt::Display for CrescentDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrescentDirection::Waxing => f.write_str("waxing"),
            CrescentDirection::Waning => f.write_str("waning"),
        }
    }
}

/// Yallop visibility category.
///
/// Ordered from best (A) to worst (E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisibilityCategory {
    /// Easily visible with the naked eye.
    A,
    /// Visible under perfect conditions.
    B,
    /// Optical aid may be needed to find the crescent, then naked eye.
    C,
    /// Visible with optical aid only.
    D,
    /// Not visible.
    E,
}

impl VisibilityCategory {
    pub const ALL: [VisibilityCategory; 5] = [
        VisibilityCategory::A,
        VisibilityCategory::B,
        VisibilityCategory::C,
        VisibilityCategory::D,
        VisibilityCategory::E,
    ];

    /// True for every category in which the crescent can be seen somehow.
    pub fn is_visible(self) -> bool {
        !matches!(self, VisibilityCategory::E)
    }

    pub fn needs_optical_aid(self) -> bool {
        matches!(self, VisibilityCategory::C | VisibilityCategory::D)
    }

    pub fn description(self) -> &'static str {
        match self {
            VisibilityCategory::A => "Easily visible with the naked eye",
            VisibilityCategory::B => "Visible with the naked eye in perfect conditions",
            VisibilityCategory::C => {
                "Need optical aid (binoculars) to find, then visible with naked eye"
            }
            VisibilityCategory::D => "Only visible with optical aid (telescope / binoculars)",
            VisibilityCategory::E => "Moon not expected to be visible",
        }
    }
}

impl fmt::Display for VisibilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VisibilityCategory::A => "A",
            VisibilityCategory::B => "B",
            VisibilityCategory::C => "C",
            VisibilityCategory::D => "D",
            VisibilityCategory::E => "E",
        };
        f.write_str(s)
    }
}

/// Visibility assessment for one grid point. Produced once, never updated.
///
/// A point whose computation failed (no sunset, ephemeris error) has every
/// numeric field at exactly zero and no observation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResult {
    #[serde(flatten)]
    pub point: GridPoint,
    pub category: VisibilityCategory,
    /// Arc of vision, degrees.
    pub arcv: f64,
    /// Crescent width, arc-minutes.
    pub crescent_width: f64,
    /// Yallop's q.
    pub q: f64,
    pub observation_time: Option<DateTime<Utc>>,
    /// Topocentric apparent altitude of the Moon, degrees.
    pub moon_altitude: f64,
    /// Hours since the previous new moon (waxing) or until the next one (waning).
    pub moon_age: Option<f64>,
}

impl VisibilityResult {
    /// Result for a point where no observation could be computed.
    pub fn degraded(point: GridPoint) -> Self {
        Self {
            point,
            category: VisibilityCategory::E,
            arcv: 0.0,
            crescent_width: 0.0,
            q: 0.0,
            observation_time: None,
            moon_altitude: 0.0,
            moon_age: None,
        }
    }

    /// True when the computation failed rather than producing a genuine assessment.
    pub fn is_degraded(&self) -> bool {
        self.observation_time.is_none()
    }
}

/// Number of grid points in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub e: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: VisibilityCategory) -> usize {
        match category {
            VisibilityCategory::A => self.a,
            VisibilityCategory::B => self.b,
            VisibilityCategory::C => self.c,
            VisibilityCategory::D => self.d,
            VisibilityCategory::E => self.e,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.c + self.d + self.e
    }
}

/// Classified grid for one evening or morning.
///
/// Results are stored in scan order: latitude ascending, then longitude
/// ascending. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityGrid {
    results: Vec<VisibilityResult>,
    date: NaiveDate,
    new_moon: Option<DateTime<Utc>>,
    next_new_moon: Option<DateTime<Utc>>,
    resolution: f64,
    direction: CrescentDirection,
}

impl VisibilityGrid {
    pub fn new(
        results: Vec<VisibilityResult>,
        date: NaiveDate,
        new_moon: Option<DateTime<Utc>>,
        next_new_moon: Option<DateTime<Utc>>,
        resolution: f64,
        direction: CrescentDirection,
    ) -> Self {
        Self {
            results,
            date,
            new_moon,
            next_new_moon,
            resolution,
            direction,
        }
    }

    pub fn results(&self) -> &[VisibilityResult] {
        &self.results
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Most recent new moon at or before the end of the evaluated day.
    pub fn new_moon(&self) -> Option<DateTime<Utc>> {
        self.new_moon
    }

    /// First new moon after the start of the evaluated day.
    pub fn next_new_moon(&self) -> Option<DateTime<Utc>> {
        self.next_new_moon
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn direction(&self) -> CrescentDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result closest to a location (Manhattan distance in degrees).
    /// Ties go to the earlier point in scan order.
    pub fn nearest(&self, lat: f64, lng: f64) -> Option<&VisibilityResult> {
        let mut best: Option<(&VisibilityResult, f64)> = None;
        for r in &self.results {
            let d = (r.point.lat - lat).abs() + (r.point.lng - lng).abs();
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((r, d)),
            }
        }
        best.map(|(r, _)| r)
    }

    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for r in &self.results {
            match r.category {
                VisibilityCategory::A => counts.a += 1,
                VisibilityCategory::B => counts.b += 1,
                VisibilityCategory::C => counts.c += 1,
                VisibilityCategory::D => counts.d += 1,
                VisibilityCategory::E => counts.e += 1,
            }
        }
        counts
    }
}
