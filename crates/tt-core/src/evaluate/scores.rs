//! Confusion counts and the F-scores used by the resampler.

use serde::{Deserialize, Serialize};
use tt_common::Label;

use crate::inference::classify;

/// Confusion matrix at the 0.5 threshold, "modified" as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ConfusionMatrix {
    pub fn observe(&mut self, label: Label, probability: f64) {
        match (label, classify(probability)) {
            (Label::Modified, Label::Modified) => self.tp += 1,
            (Label::NotModified, Label::NotModified) => self.tn += 1,
            (Label::NotModified, Label::Modified) => self.fp += 1,
            (Label::Modified, Label::NotModified) => self.fn_ += 1,
        }
    }

    pub fn from_scored<I>(scored: I) -> Self
    where
        I: IntoIterator<Item = (Label, f64)>,
    {
        let mut matrix = ConfusionMatrix::default();
        for (label, probability) in scored {
            matrix.observe(label, probability);
        }
        matrix
    }

    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn merge(&mut self, other: &ConfusionMatrix) {
        self.tp += other.tp;
        self.tn += other.tn;
        self.fp += other.fp;
        self.fn_ += other.fn_;
    }

    /// True when only one ground-truth class is present.
    pub fn is_single_class(&self) -> bool {
        let modified = self.tp + self.fn_;
        let not_modified = self.tn + self.fp;
        modified == 0 || not_modified == 0
    }

    /// F-score with "modified" as the target class.
    pub fn f1(&self) -> f64 {
        f_score(self.tp, self.fp, self.fn_)
    }

    /// F-score with "not modified" as the target class.
    pub fn f2(&self) -> f64 {
        f_score(self.tn, self.fn_, self.fp)
    }
}

/// Harmonic mean of precision `1/(1 + fp/hits)` and recall `1/(1 + misses/hits)`,
/// with `hits` floored at 1.
fn f_score(hits: u64, false_alarms: u64, misses: u64) -> f64 {
    let hits = hits.max(1) as f64;
    let precision = 1.0 / (1.0 + false_alarms as f64 / hits);
    let recall = 1.0 / (1.0 + misses as f64 / hits);
    2.0 / (1.0 / precision + 1.0 / recall)
}
