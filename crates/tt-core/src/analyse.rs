//! Post-hoc analysis of scored entries.
//!
//! Produces the confusion totals and the misclassification progression that
//! an external plotter turns into charts.

use serde::Serialize;
use tt_common::BundleId;

use crate::evaluate::ConfusionMatrix;
use crate::learn::ScoredEntry;

/// One point of the error-rate progression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressPoint {
    /// 1-based position across the whole table.
    pub index: usize,
    pub bundle: BundleId,
    pub error: f64,
}

/// Summary of a scored table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub entries: usize,
    pub bundles: usize,
    pub confusion: ConfusionMatrix,
    pub f1: f64,
    pub f2: f64,
    /// Share of misclassified entries over the whole table.
    pub misclassification_rate: f64,
    pub progression: Vec<ProgressPoint>,
}

pub fn analyse(scored: &[ScoredEntry]) -> Analysis {
    let confusion =
        ConfusionMatrix::from_scored(scored.iter().map(|s| (s.entry.modified, s.probability)));
    let progression: Vec<ProgressPoint> = scored
        .iter()
        .enumerate()
        .map(|(i, s)| ProgressPoint {
            index: i + 1,
            bundle: s.bundle,
            error: s.error,
        })
        .collect();

    let mut bundles: Vec<BundleId> = scored.iter().map(|s| s.bundle).collect();
    bundles.sort_unstable();
    bundles.dedup();

    let total = confusion.total();
    let misclassification_rate = if total == 0 {
        0.0
    } else {
        (confusion.fp + confusion.fn_) as f64 / total as f64
    };

    Analysis {
        entries: scored.len(),
        bundles: bundles.len(),
        f1: confusion.f1(),
        f2: confusion.f2(),
        confusion,
        misclassification_rate,
        progression,
    }
}

impl Analysis {
    /// Markdown rendering for `--format md`.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Model analysis\n\n");
        out.push_str(&format!(
            "{} entries across {} bundles\n\n",
            self.entries, self.bundles
        ));
        out.push_str("| | predicted modified | predicted not modified |\n");
        out.push_str("|---|---|---|\n");
        out.push_str(&format!(
            "| modified | {} | {} |\n",
            self.confusion.tp, self.confusion.fn_
        ));
        out.push_str(&format!(
            "| not modified | {} | {} |\n\n",
            self.confusion.fp, self.confusion.tn
        ));
        out.push_str(&format!(
            "- misclassification rate: {:.4}\n- F1: {:.4}\n- F2: {:.4}\n",
            self.misclassification_rate, self.f1, self.f2
        ));
        out
    }
}
