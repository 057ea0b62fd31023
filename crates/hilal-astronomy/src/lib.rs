//! Crescent visibility astronomy.
//!
//! - [`ephemeris`]: the [`Ephemeris`] trait every computation goes through.
//! - [`meeus`]: [`MeeusEphemeris`], the bundled analytic provider.
//! - [`yallop`]: crescent width, Yallop's q and the category thresholds.
//! - [`visibility`]: [`VisibilityCalculator`], which classifies a whole grid.

pub mod config;
pub mod coords;
pub mod ephemeris;
pub mod meeus;
mod search;
pub mod solar;
pub mod visibility;
pub mod yallop;

pub use config::{
    BestTimePolicy, GridSpec, VisibilityConfig, VisibilityConfigBuilder, YallopThresholds,
};
pub use ephemeris::{Body, Direction, Ephemeris, EphemerisError, Horizontal, Illumination, Observer};
pub use meeus::MeeusEphemeris;
pub use visibility::VisibilityCalculator;
pub use yallop::{Q_MOON_BELOW_HORIZON, crescent_width, yallop_q};
