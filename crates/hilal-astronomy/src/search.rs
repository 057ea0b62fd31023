//! Coarse scan + bisection over a bounded window of Julian days.

use crate::ephemeris::{Direction, EphemerisError};

const CONVERGENCE_DAYS: f64 = 1e-5;
const MAX_ITERATIONS: usize = 60;

/// Scan parameters for one kind of event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scan {
    pub step_days: f64,
    /// Reject sign changes whose jump exceeds this (angle wrap-around).
    pub max_jump: Option<f64>,
}

impl Scan {
    /// Altitude events: at most one crossing per sense within half an hour.
    pub const ALTITUDE: Scan = Scan {
        step_days: 1.0 / 48.0,
        max_jump: None,
    };

    /// Phase events: the elongation moves about 12 degrees a day.
    pub const PHASE: Scan = Scan {
        step_days: 0.5,
        max_jump: Some(270.0),
    };
}

fn is_crossing(f_a: f64, f_b: f64, direction: Direction, max_jump: Option<f64>) -> bool {
    let sensed = match direction {
        Direction::Rising => f_a < 0.0 && f_b >= 0.0,
        Direction::Setting => f_a > 0.0 && f_b <= 0.0,
    };
    sensed && max_jump.is_none_or(|m| (f_a - f_b).abs() < m)
}

/// Returns the first JD in `[start, start + window]` where `f` crosses zero in `direction`.
pub(crate) fn find_crossing<F>(
    f: F,
    start: f64,
    window_days: f64,
    direction: Direction,
    scan: Scan,
) -> Result<Option<f64>, EphemerisError>
where
    F: Fn(f64) -> Result<f64, EphemerisError>,
{
    if !window_days.is_finite() || window_days <= 0.0 {
        return Err(EphemerisError::InvalidWindow { days: window_days });
    }
    let end = start + window_days;

    let mut t_prev = start;
    let mut f_prev = f(t_prev)?;
    while t_prev < end {
        let t_curr = (t_prev + scan.step_days).min(end);
        let f_curr = f(t_curr)?;
        if is_crossing(f_prev, f_curr, direction, scan.max_jump) {
            return bisect(&f, t_prev, f_prev, t_curr).map(Some);
        }
        t_prev = t_curr;
        f_prev = f_curr;
    }
    Ok(None)
}

fn bisect<F>(f: &F, mut t_a: f64, mut f_a: f64, mut t_b: f64) -> Result<f64, EphemerisError>
where
    F: Fn(f64) -> Result<f64, EphemerisError>,
{
    for _ in 0..MAX_ITERATIONS {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid)?;
        if (f_a < 0.0) != (f_mid < 0.0) || f_mid == 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if t_b - t_a < CONVERGENCE_DAYS {
            break;
        }
    }
    Ok(0.5 * (t_a + t_b))
}
