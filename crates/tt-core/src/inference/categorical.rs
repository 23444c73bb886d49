//! Categorical feature posterior.
//!
//! One count table per categorical feature. Each observed value gets a
//! Laplace-smoothed bucket; a reserved `Unknown` bucket counts first
//! sightings. The contribution of an entry is the sum over features of the
//! log ratio between the modified and not-modified counts of its bucket,
//! read after the entry has been counted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tt_common::{CategoricalFeature, Entry, Label};
use tt_math::log_ratio;

/// Per-value class counts.
///
/// The total is derived, so it always equals `true_count + false_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub true_count: u64,
    pub false_count: u64,
}

impl Default for Counts {
    /// Laplace pseudo-counts.
    fn default() -> Self {
        Counts {
            true_count: 1,
            false_count: 1,
        }
    }
}

impl Counts {
    pub fn total(&self) -> u64 {
        self.true_count + self.false_count
    }

    pub fn increment(&mut self, label: Label) {
        match label {
            Label::Modified => self.true_count += 1,
            Label::NotModified => self.false_count += 1,
        }
    }

    /// `ln(true_count / false_count)`.
    pub fn log_ratio(&self) -> f64 {
        log_ratio(self.true_count as f64, self.false_count as f64)
    }
}

/// Count table for a single categorical feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    /// Incremented once per never-seen value.
    pub unknown: Counts,
    pub values: HashMap<String, Counts>,
}

impl FeatureTable {
    /// Count one observation and return the post-update bucket.
    fn observe(&mut self, value: &str, label: Label) -> Counts {
        if !self.values.contains_key(value) {
            self.unknown.increment(label);
        }
        let bucket = self.values.entry(value.to_string()).or_default();
        bucket.increment(label);
        *bucket
    }

    pub fn get(&self, value: &str) -> Option<&Counts> {
        self.values.get(value)
    }

    /// Distinct values seen, not counting `Unknown`.
    pub fn distinct(&self) -> usize {
        self.values.len()
    }
}

/// Count tables for every categorical feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalState {
    tables: [FeatureTable; 3],
}

impl CategoricalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, feature: CategoricalFeature) -> &FeatureTable {
        &self.tables[feature_index(feature)]
    }

    /// Count the entry and return its log-likelihood-ratio contribution.
    pub fn update(mut self, entry: &Entry) -> (Self, f64) {
        let mut contribution = 0.0;
        for feature in CategoricalFeature::ALL {
            let bucket =
                self.tables[feature_index(feature)].observe(entry.feature(feature), entry.modified);
            contribution += bucket.log_ratio();
        }
        (self, contribution)
    }
}

fn feature_index(feature: CategoricalFeature) -> usize {
    match feature {
        CategoricalFeature::Project => 0,
        CategoricalFeature::Description => 1,
        CategoricalFeature::Tags => 2,
    }
}
