//! WASM bindings for Hilal - crescent visibility maps and Islamic months
//!
//! Every function returns plain camelCase objects for the map UI.

use chrono::{DateTime, NaiveDate, Utc};
use hilal_core::{
    CategoryCounts, CrescentDirection, HilalEngine, HilalError, IslamicMonthEntry, VisibilityGrid,
    VisibilityResult, nearest_month_route, parse_civil_date,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Months fetched when the caller does not say.
const DEFAULT_MONTH_COUNT: usize = 12;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

fn parse_direction(s: &str) -> Result<CrescentDirection, JsValue> {
    match s.trim().to_ascii_lowercase().as_str() {
        "waxing" | "evening" => Ok(CrescentDirection::Waxing),
        "waning" | "morning" => Ok(CrescentDirection::Waning),
        other => Err(JsValue::from_str(&format!(
            "Invalid crescent direction {other:?}, expected \"waxing\" or \"waning\""
        ))),
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JsValue::from_str(&format!("Invalid timestamp {s:?}: {e}")))
}

fn grid(
    date: NaiveDate,
    direction: CrescentDirection,
    resolution: f64,
) -> Result<WasmVisibilityGrid, HilalError> {
    HilalEngine::new()
        .visibility_grid_at(date, direction, resolution)
        .map(WasmVisibilityGrid::from)
}

fn months(date: NaiveDate, count: usize) -> Result<Vec<IslamicMonthEntry>, HilalError> {
    HilalEngine::new().upcoming_months(date, count)
}

/// Classifies crescent visibility over the globe.
///
/// # Example (JavaScript)
/// ```js
/// const grid = visibilityGrid("2026-02-18", "waxing", 4);
/// console.log(grid.counts.a, grid.points[0].category);
/// ```
#[wasm_bindgen(js_name = visibilityGrid)]
pub fn visibility_grid(
    date_str: &str,
    direction: &str,
    resolution: f64,
) -> Result<JsValue, JsValue> {
    let date = parse_civil_date(date_str).map_err(js_error)?;
    let direction = parse_direction(direction)?;
    to_js(&grid(date, direction, resolution).map_err(js_error)?)
}

/// Consecutive Islamic months starting at or before a date.
#[wasm_bindgen(js_name = upcomingMonths)]
pub fn upcoming_months(date_str: &str, count: usize) -> Result<JsValue, JsValue> {
    let date = parse_civil_date(date_str).map_err(js_error)?;
    let months: Vec<WasmIslamicMonth> = months(date, count)
        .map_err(js_error)?
        .iter()
        .map(WasmIslamicMonth::from)
        .collect();
    to_js(&months)
}

/// Route (`/{year}AH/{slug}`) of the month whose new moon is closest to `now_iso`.
#[wasm_bindgen(js_name = nearestMonthRoute)]
pub fn nearest_route(date_str: &str, now_iso: &str) -> Result<Option<String>, JsValue> {
    let date = parse_civil_date(date_str).map_err(js_error)?;
    let now = parse_instant(now_iso)?;
    let months = months(date, DEFAULT_MONTH_COUNT).map_err(js_error)?;
    Ok(nearest_month_route(&months, now))
}

/// Class-based API bound to one date.
///
/// # Example (JavaScript)
/// ```js
/// const hilal = new Hilal("2026-02-18");
/// console.log(hilal.hijriDate());
/// const map = hilal.grid("waxing", 4);
/// ```
#[wasm_bindgen]
pub struct Hilal {
    date: NaiveDate,
}

#[wasm_bindgen]
impl Hilal {
    #[wasm_bindgen(constructor)]
    pub fn new(date_str: &str) -> Result<Hilal, JsValue> {
        console_error_panic_hook::set_once();
        let date = parse_civil_date(date_str).map_err(js_error)?;
        Ok(Hilal { date })
    }

    /// Hijri date, e.g. "1 Ramadan 1447 AH".
    #[wasm_bindgen(js_name = hijriDate)]
    pub fn hijri_date(&self) -> String {
        HilalEngine::new().hijri_date(self.date).to_string()
    }

    pub fn grid(&self, direction: &str, resolution: f64) -> Result<JsValue, JsValue> {
        let direction = parse_direction(direction)?;
        to_js(&grid(self.date, direction, resolution).map_err(js_error)?)
    }

    pub fn months(&self, count: usize) -> Result<JsValue, JsValue> {
        let months: Vec<WasmIslamicMonth> = months(self.date, count)
            .map_err(js_error)?
            .iter()
            .map(WasmIslamicMonth::from)
            .collect();
        to_js(&months)
    }
}

/// One grid point for TypeScript consumers.
#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmVisibilityPoint {
    pub lat: f64,
    pub lng: f64,
    pub category: String,
    pub arcv: f64,
    pub crescent_width: f64,
    pub q: f64,
    pub observation_time: Option<String>,
    pub moon_altitude: f64,
    pub moon_age: Option<f64>,
}

impl From<&VisibilityResult> for WasmVisibilityPoint {
    fn from(r: &VisibilityResult) -> Self {
        Self {
            lat: r.point.lat,
            lng: r.point.lng,
            category: r.category.to_string(),
            arcv: r.arcv,
            crescent_width: r.crescent_width,
            q: r.q,
            observation_time: r.observation_time.map(|t| t.to_rfc3339()),
            moon_altitude: r.moon_altitude,
            moon_age: r.moon_age,
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmCategoryCounts {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub e: usize,
}

impl From<CategoryCounts> for WasmCategoryCounts {
    fn from(c: CategoryCounts) -> Self {
        Self { a: c.a, b: c.b, c: c.c, d: c.d, e: c.e }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmVisibilityGrid {
    pub date: String,
    pub direction: String,
    pub resolution: f64,
    pub new_moon: Option<String>,
    pub next_new_moon: Option<String>,
    pub counts: WasmCategoryCounts,
    pub points: Vec<WasmVisibilityPoint>,
}

impl From<VisibilityGrid> for WasmVisibilityGrid {
    fn from(grid: VisibilityGrid) -> Self {
        Self {
            date: grid.date().to_string(),
            direction: grid.direction().to_string(),
            resolution: grid.resolution(),
            new_moon: grid.new_moon().map(|t| t.to_rfc3339()),
            next_new_moon: grid.next_new_moon().map(|t| t.to_rfc3339()),
            counts: grid.counts().into(),
            points: grid.results().iter().map(WasmVisibilityPoint::from).collect(),
        }
    }
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmIslamicMonth {
    pub name: String,
    pub year: i32,
    pub label: String,
    pub gregorian_label: String,
    pub new_moon: String,
    pub map_dates: Vec<String>,
    pub map_day_labels: Vec<String>,
    pub route_slug: String,
    pub route_path: String,
}

impl From<&IslamicMonthEntry> for WasmIslamicMonth {
    fn from(m: &IslamicMonthEntry) -> Self {
        Self {
            name: m.name.to_string(),
            year: m.year,
            label: m.label(),
            gregorian_label: m.gregorian_label.clone(),
            new_moon: m.new_moon.to_rfc3339(),
            map_dates: m.map_dates.iter().map(NaiveDate::to_string).collect(),
            map_day_labels: m.map_days().map(|(day, _)| day.label().to_string()).collect(),
            route_slug: m.route_slug.clone(),
            route_path: m.route_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilal_core::{GridPoint, IslamicMonth, VisibilityCategory};

    #[test]
    fn month_view_carries_route_and_labels() {
        let day = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        let entry = IslamicMonthEntry {
            name: IslamicMonth::Ramadan,
            year: 1447,
            gregorian_label: "February 2026".into(),
            new_moon: day.and_hms_opt(12, 1, 0).unwrap().and_utc(),
            map_dates: [day, day.succ_opt().unwrap(), day.succ_opt().unwrap().succ_opt().unwrap()],
            route_slug: "Ramadan".into(),
        };
        let w = WasmIslamicMonth::from(&entry);
        assert_eq!(w.route_path, "/1447AH/Ramadan");
        assert_eq!(w.label, "Ramadan 1447 AH");
        assert_eq!(w.map_dates, vec!["2026-02-17", "2026-02-18", "2026-02-19"]);
        assert_eq!(w.map_day_labels[0], "New Moon Day (Conjunction)");
    }

    #[test]
    fn degraded_point_has_no_time() {
        let r = VisibilityResult::degraded(GridPoint::new(64.0, 10.0));
        let w = WasmVisibilityPoint::from(&r);
        assert_eq!(w.category, VisibilityCategory::E.to_string());
        assert!(w.observation_time.is_none());
        assert_eq!(w.q, 0.0);
    }
}
