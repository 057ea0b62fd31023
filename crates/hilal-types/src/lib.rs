//! Core types shared by the `hilal` crates.
//!
//! Everything here is plain data: grid samples, per-point visibility results,
//! Hijri dates and month entries. Computation lives in the sibling crates.

pub mod error;
pub mod month;
pub mod visibility;

pub use error::HilalError;
pub use month::{HijriDate, IslamicMonth, IslamicMonthEntry, MapDay};
pub use visibility::{
    CategoryCounts, CrescentDirection, GridPoint, VisibilityCategory, VisibilityGrid,
    VisibilityResult,
};
