//! Visibility policy: grid resolution, category thresholds, best-time rule.

use hilal_types::{GridPoint, HilalError, VisibilityCategory};
use serde::{Deserialize, Serialize};

/// Lower q bounds of categories A-D. Anything at or below `d` is E.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YallopThresholds {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Default for YallopThresholds {
    fn default() -> Self {
        Self::relaxed()
    }
}

impl YallopThresholds {
    /// Thresholds the visibility maps ship with.
    pub const fn relaxed() -> Self {
        Self {
            a: 0.10,
            b: -0.19,
            c: -0.36,
            d: -0.63,
        }
    }

    /// Yallop's published thresholds (NAO Technical Note 69).
    pub const fn published() -> Self {
        Self {
            a: 0.216,
            b: -0.014,
            c: -0.160,
            d: -0.232,
        }
    }

    pub fn validate(&self) -> Result<(), HilalError> {
        let t = [self.a, self.b, self.c, self.d];
        if t.iter().any(|x| !x.is_finite()) {
            return Err(HilalError::invalid_config("thresholds must be finite"));
        }
        if !t.windows(2).all(|w| w[0] > w[1]) {
            return Err(HilalError::invalid_config(format!(
                "thresholds must be strictly descending, got {t:?}"
            )));
        }
        Ok(())
    }

    /// Category for q. Every real q (and NaN) maps to exactly one category.
    pub fn classify(&self, q: f64) -> VisibilityCategory {
        if q > self.a {
            VisibilityCategory::A
        } else if q > self.b {
            VisibilityCategory::B
        } else if q > self.c {
            VisibilityCategory::C
        } else if q > self.d {
            VisibilityCategory::D
        } else {
            VisibilityCategory::E
        }
    }
}

/// End of astronomical twilight.
const MIN_SUN_ALTITUDE: f64 = -18.0;
/// The Sun's centre already sits near -0.27 degrees apparent when its upper
/// limb sets, so targets must lie clearly below that.
const MAX_SUN_ALTITUDE: f64 = -0.5;

/// How the best observation time is chosen relative to sunset/sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum BestTimePolicy {
    /// When the Sun's apparent altitude reaches `degrees` (after sunset, before sunrise).
    SunAltitude { degrees: f64 },
    /// A fraction of the Sun-Moon lag past sunset (or before sunrise).
    LagFraction { fraction: f64 },
}

impl Default for BestTimePolicy {
    fn default() -> Self {
        Self::SunAltitude { degrees: -1.0 }
    }
}

impl BestTimePolicy {
    /// Yallop's best time: sunset + 4/9 of the lag.
    pub const fn yallop() -> Self {
        Self::LagFraction { fraction: 4.0 / 9.0 }
    }

    pub fn validate(&self) -> Result<(), HilalError> {
        match *self {
            Self::SunAltitude { degrees }
                if !(MIN_SUN_ALTITUDE..=MAX_SUN_ALTITUDE).contains(&degrees) =>
            {
                Err(HilalError::invalid_config(format!(
                    "sun altitude {degrees} outside [{MIN_SUN_ALTITUDE}, {MAX_SUN_ALTITUDE}]"
                )))
            }
            Self::LagFraction { fraction } if !(fraction > 0.0 && fraction <= 1.0) => Err(
                HilalError::invalid_config(format!("lag fraction {fraction} outside (0, 1]")),
            ),
            _ => Ok(()),
        }
    }
}

/// The global sampling lattice: latitudes -65..=65, longitudes -180..=180.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    resolution: f64,
}

impl GridSpec {
    pub const LAT_MIN: f64 = -65.0;
    pub const LAT_MAX: f64 = 65.0;
    pub const LNG_MIN: f64 = -180.0;
    pub const LNG_MAX: f64 = 180.0;
    /// Upper bound on grid points; a 0.1 degree grid still fits.
    pub const MAX_POINTS: usize = 5_000_000;

    /// Rejects non-finite or non-positive resolutions and grids above [`Self::MAX_POINTS`].
    pub fn new(resolution: f64) -> Result<Self, HilalError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(HilalError::InvalidResolution { resolution });
        }
        let points = Self::axis_points(Self::LAT_MIN, Self::LAT_MAX, resolution)
            * Self::axis_points(Self::LNG_MIN, Self::LNG_MAX, resolution);
        if points > Self::MAX_POINTS as f64 {
            return Err(HilalError::InvalidResolution { resolution });
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    fn axis_points(min: f64, max: f64, r: f64) -> f64 {
        ((max - min) / r + 1e-9).floor() + 1.0
    }

    fn steps(min: f64, max: f64, r: f64) -> usize {
        Self::axis_points(min, max, r) as usize
    }

    pub fn lat_count(&self) -> usize {
        Self::steps(Self::LAT_MIN, Self::LAT_MAX, self.resolution)
    }

    pub fn lng_count(&self) -> usize {
        Self::steps(Self::LNG_MIN, Self::LNG_MAX, self.resolution)
    }

    pub fn len(&self) -> usize {
        self.lat_count() * self.lng_count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Points ordered by latitude ascending, then longitude ascending.
    pub fn points(&self) -> Vec<GridPoint> {
        let r = self.resolution;
        let lngs = self.lng_count();
        (0..self.lat_count())
            .flat_map(|i| {
                let lat = Self::LAT_MIN + i as f64 * r;
                (0..lngs).map(move |j| GridPoint::new(lat, Self::LNG_MIN + j as f64 * r))
            })
            .collect()
    }
}

/// Visibility computation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityConfig {
    /// Grid spacing in degrees.
    pub resolution: f64,
    pub thresholds: YallopThresholds,
    pub best_time: BestTimePolicy,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            resolution: 4.0,
            thresholds: YallopThresholds::default(),
            best_time: BestTimePolicy::default(),
        }
    }
}

impl VisibilityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn thresholds(mut self, thresholds: YallopThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn best_time(mut self, policy: BestTimePolicy) -> Self {
        self.best_time = policy;
        self
    }

    pub fn validate(&self) -> Result<(), HilalError> {
        GridSpec::new(self.resolution)?;
        self.thresholds.validate()?;
        self.best_time.validate()
    }
}

/// Builder with validation for [`VisibilityConfig`].
#[derive(Debug, Default)]
pub struct VisibilityConfigBuilder {
    resolution: Option<f64>,
    thresholds: Option<YallopThresholds>,
    best_time: Option<BestTimePolicy>,
}

impl VisibilityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn thresholds(mut self, thresholds: YallopThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn best_time(mut self, policy: BestTimePolicy) -> Self {
        self.best_time = Some(policy);
        self
    }

    /// Builds and validates.
    pub fn build(self) -> Result<VisibilityConfig, HilalError> {
        let defaults = VisibilityConfig::default();
        let config = VisibilityConfig {
            resolution: self.resolution.unwrap_or(defaults.resolution),
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
            best_time: self.best_time.unwrap_or(defaults.best_time),
        };
        config.validate()?;
        Ok(config)
    }
}
