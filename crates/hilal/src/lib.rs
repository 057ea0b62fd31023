//! # Hilal
//!
//! Where on Earth can the new crescent Moon be seen tonight, and which
//! Islamic month does it open?
//!
//! This crate is a facade that re-exports the `hilal` crates.
//!
//! - Visibility grids: Yallop's q over a global latitude/longitude lattice,
//!   one category (A-E) per point.
//! - Month sequences: consecutive lunar months from astronomical new moons,
//!   named through the Umm al-Qura calendar with a tabular fallback.
//!
//! ## Usage
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use hilal::prelude::*;
//!
//! let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
//! let grid = hilal::visibility_grid(date, CrescentDirection::Waxing, 4.0)?;
//! println!("{} of {} points see the crescent", grid.len() - grid.counts().e, grid.len());
//! # Ok::<(), HilalError>(())
//! ```

pub use hilal_core::*;
