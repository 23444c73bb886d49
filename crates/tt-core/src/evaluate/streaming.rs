//! Running misclassification and entropy-loss rates within a bundle.

use serde::{Deserialize, Serialize};
use tt_common::Label;
use tt_math::log_odds;

use crate::inference::classify;

/// Running statistics after the first `count` entries of a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    /// 1-based position of the latest entry.
    pub count: usize,
    pub errors: usize,
    /// `errors / count`.
    pub error_rate: f64,
    /// Running mean of the per-entry entropy loss.
    pub entropy_rate: f64,
}

impl RunningStats {
    /// Fold one scored entry into the running statistics.
    ///
    /// `previous` is `None` for the first entry of a bundle.
    pub fn advance(previous: Option<&RunningStats>, label: Label, probability: f64) -> Self {
        let prev = previous.copied().unwrap_or_default();
        let count = prev.count + 1;
        let n = count as f64;

        let loss = entropy_loss(label, probability);
        let errors = prev.errors + usize::from(loss.is_some());
        let weight = 1.0 / n;

        RunningStats {
            count,
            errors,
            error_rate: errors as f64 / n,
            entropy_rate: (1.0 - weight) * prev.entropy_rate + weight * loss.unwrap_or(0.0),
        }
    }
}

/// Whether `probability` classifies `label` wrongly.
pub fn is_misclassified(label: Label, probability: f64) -> bool {
    classify(probability) != label
}

/// Entropy loss of a misclassified entry, `None` when correct.
///
/// False positive: `-ln((1-p)/p)`. False negative: `+ln((1-p)/p)`.
pub fn entropy_loss(label: Label, probability: f64) -> Option<f64> {
    if !is_misclassified(label, probability) {
        return None;
    }
    // log_odds(p) = ln(p / (1-p)) = -ln((1-p)/p)
    let log_ratio = -log_odds(probability);
    Some(match label {
        Label::NotModified => -log_ratio,
        Label::Modified => log_ratio,
    })
}
