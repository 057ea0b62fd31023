//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;
use hilal_calendar::{HijriResolver, LocaleCalendar, resolve_hijri, tabular_hijri};
use hilal_types::{CrescentDirection, HijriDate, HilalError, VisibilityGrid};

use crate::engine::HilalEngine;

/// Extends `NaiveDate` with Hijri and crescent lookups.
pub trait HilalDateExt {
    /// Tabular (Kuwaiti) Hijri date. Pure arithmetic, about a day off the sighted calendar.
    fn tabular_hijri(&self) -> HijriDate;

    /// Umm al-Qura Hijri date, tabular outside 1938-2076.
    fn hijri(&self) -> HijriDate;

    /// Hijri date through a specific locale calendar.
    fn hijri_with<L: LocaleCalendar>(&self, calendar: L) -> HijriDate;

    /// Evening (waxing) visibility grid with the default engine.
    fn evening_crescent(&self) -> Result<VisibilityGrid, HilalError>;

    /// Morning (waning) visibility grid with the default engine.
    fn morning_crescent(&self) -> Result<VisibilityGrid, HilalError>;
}

impl HilalDateExt for NaiveDate {
    fn tabular_hijri(&self) -> HijriDate {
        tabular_hijri(*self)
    }

    fn hijri(&self) -> HijriDate {
        resolve_hijri(*self)
    }

    fn hijri_with<L: LocaleCalendar>(&self, calendar: L) -> HijriDate {
        HijriResolver::new(calendar).resolve(*self)
    }

    fn evening_crescent(&self) -> Result<VisibilityGrid, HilalError> {
        HilalEngine::new().visibility_grid(*self, CrescentDirection::Waxing)
    }

    fn morning_crescent(&self) -> Result<VisibilityGrid, HilalError> {
        HilalEngine::new().visibility_grid(*self, CrescentDirection::Waning)
    }
}
