//! Circular (time-of-day) helpers.
//!
//! Hours are mapped onto the unit circle so that 23:00 and 00:00 are
//! neighbours.

use std::f64::consts::TAU;

/// Hours in one full turn of the clock.
pub const HOURS_PER_TURN: f64 = 24.0;

/// Lower bound on the variance used to derive a concentration rate.
///
/// A dataset whose entries all share one hour has zero variance, which would
/// make `1 / (2 var)` infinite.
pub const VARIANCE_FLOOR: f64 = 1e-9;

/// Map an hour of day (0-23) to an angle in radians.
pub fn hour_to_angle(hour: u32) -> f64 {
    (f64::from(hour) / HOURS_PER_TURN) * TAU
}

/// Population variance of raw angles (no wrap-around correction).
///
/// Returns `None` for an empty slice.
pub fn angle_variance(angles: &[f64]) -> Option<f64> {
    if angles.is_empty() {
        return None;
    }
    let n = angles.len() as f64;
    let mean = angles.iter().sum::<f64>() / n;
    let var = angles.iter().map(|a| (a - mean) * (a - mean)).sum::<f64>() / n;
    Some(var)
}

/// Concentration learning rate `κ = 1 / (2 var)`, with the variance floored.
pub fn concentration_rate(variance: f64) -> f64 {
    1.0 / (2.0 * variance.max(VARIANCE_FLOOR))
}
