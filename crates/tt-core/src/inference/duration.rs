//! Gamma-style posterior over entry duration (in weeks).

use serde::{Deserialize, Serialize};
use tt_common::Label;
use tt_math::{guard_positive, log_ratio};

use super::GuardStats;

/// Floor applied to a non-positive or non-finite rate.
pub const RATE_FLOOR: f64 = 0.001;

/// Shape/rate pair for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRate {
    pub shape: f64,
    pub rate: f64,
}

impl Default for ShapeRate {
    fn default() -> Self {
        ShapeRate {
            shape: 1.0,
            rate: 1.0,
        }
    }
}

impl ShapeRate {
    fn absorb(self, x: f64, guards: &mut GuardStats) -> Self {
        let rate = guard_positive(self.rate / (1.0 + self.rate * x), RATE_FLOOR);
        if rate.clamped {
            guards.rate_clamps += 1;
        }
        ShapeRate {
            shape: self.shape + 1.0,
            rate: rate.value,
        }
    }
}

/// Per-class duration state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationState {
    /// Indexed by [`Label::class_index`].
    pub classes: [ShapeRate; 2],
}

impl DurationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, label: Label) -> &ShapeRate {
        &self.classes[label.class_index()]
    }

    /// Absorb duration `x` (weeks) into the entry's class and return the
    /// contribution.
    pub fn update(mut self, x: f64, label: Label, guards: &mut GuardStats) -> (Self, f64) {
        let idx = label.class_index();
        self.classes[idx] = self.classes[idx].absorb(x, guards);
        let contribution = self.contribution(x);
        (self, contribution)
    }

    /// `((d0·c1 − d1·c0) / (d0·d1)) · (−x) · (ln(c1/c0) + ln(d0/d1))`.
    pub fn contribution(&self, x: f64) -> f64 {
        let [ShapeRate { shape: c0, rate: d0 }, ShapeRate { shape: c1, rate: d1 }] = self.classes;
        let scale = (d0 * c1 - d1 * c0) / (d0 * d1);
        scale * (-x) * (log_ratio(c1, c0) + log_ratio(d0, d1))
    }
}
