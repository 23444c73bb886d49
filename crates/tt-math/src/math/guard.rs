//! Stabilization guards for recursive posterior updates.
//!
//! Online updates can drift into invalid territory (non-positive
//! concentration, out-of-range direction, negative rate). Instead of
//! propagating NaN or failing the run, the offending value is replaced by a
//! small positive floor. The replacement is reported through [`Guarded`] so
//! callers can count and test it.

use serde::{Deserialize, Serialize};

/// Result of passing a raw update through a guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guarded {
    /// Value to carry forward.
    pub value: f64,
    /// Whether the raw value was rejected and replaced by the floor.
    pub clamped: bool,
}

impl Guarded {
    fn accept(value: f64) -> Self {
        Self {
            value,
            clamped: false,
        }
    }

    fn floor(floor: f64) -> Self {
        Self {
            value: floor,
            clamped: true,
        }
    }
}

/// Accept `raw` if it is finite and strictly positive, otherwise use `floor`.
pub fn guard_positive(raw: f64, floor: f64) -> Guarded {
    if raw.is_finite() && raw > 0.0 {
        Guarded::accept(raw)
    } else {
        Guarded::floor(floor)
    }
}

/// Accept `raw` if it lies in `(lo, hi]`, otherwise use `floor`.
pub fn guard_half_open(raw: f64, lo: f64, hi: f64, floor: f64) -> Guarded {
    if raw.is_finite() && raw > lo && raw <= hi {
        Guarded::accept(raw)
    } else {
        Guarded::floor(floor)
    }
}
