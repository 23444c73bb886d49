//! Log-odds fusion and the 0.5 decision rule.

use serde::{Deserialize, Serialize};
use tt_common::Label;
use tt_math::bounded_logistic;

/// Probability at or above which an entry is classified as modified.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Per-feature log-likelihood-ratio contributions for one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    pub categorical: f64,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

impl Contributions {
    pub fn total(&self) -> f64 {
        self.categorical + self.start + self.end + self.duration
    }

    /// Fused probability that the entry was modified.
    pub fn probability(&self) -> f64 {
        fuse(self.total())
    }
}

/// Logistic of the summed log-odds, kept strictly inside (0, 1).
pub fn fuse(log_odds: f64) -> f64 {
    bounded_logistic(log_odds)
}

/// Decision for a fused probability.
pub fn classify(probability: f64) -> Label {
    Label::from_bool(probability >= DECISION_THRESHOLD)
}
