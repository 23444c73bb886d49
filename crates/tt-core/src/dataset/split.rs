//! Train/test/validate partitioning and category inventory.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tt_common::{CategoricalFeature, Entry, Result};
use tt_config::SplitFractions;

/// Name of the reserved bucket for never-seen values.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// The three partitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub train: Vec<Entry>,
    pub test: Vec<Entry>,
    pub validate: Vec<Entry>,
}

impl Partition {
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.len(), self.test.len(), self.validate.len())
    }
}

/// Split `entries` by `fractions`.
///
/// Train and test sizes are `round(n·fraction)` (ties to even); validate
/// takes the remainder. Order is kept unless `shuffle_seed` is given.
pub fn split_entries(
    mut entries: Vec<Entry>,
    fractions: &SplitFractions,
    shuffle_seed: Option<u64>,
) -> Result<Partition> {
    fractions.validate()?;

    if let Some(seed) = shuffle_seed {
        entries.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    let n = entries.len();
    let train_len = portion(n, fractions.train).min(n);
    let test_len = portion(n, fractions.test).min(n - train_len);

    let validate = entries.split_off(train_len + test_len);
    let test = entries.split_off(train_len);
    Ok(Partition {
        train: entries,
        test,
        validate,
    })
}

fn portion(n: usize, fraction: f64) -> usize {
    (n as f64 * fraction).round_ties_even() as usize
}

/// Distinct values per categorical feature, counting the `Unknown` bucket.
pub fn category_counts(entries: &[Entry]) -> BTreeMap<CategoricalFeature, usize> {
    CategoricalFeature::ALL
        .iter()
        .map(|feature| {
            let mut values: HashSet<&str> = HashSet::from([UNKNOWN_CATEGORY]);
            values.extend(entries.iter().map(|e| e.feature(*feature)));
            (*feature, values.len())
        })
        .collect()
}

/// Serializable split report.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub train: usize,
    pub test: usize,
    pub validate: usize,
    pub shuffled: bool,
    pub categories: BTreeMap<CategoricalFeature, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry_with;
    use tt_common::{Error, Label};

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| entry_with(&format!("P{}", i % 3), &format!("D{}", i), "", Label::Modified))
            .collect()
    }

    #[test]
    fn default_fractions_on_ten_entries() {
        let part = split_entries(entries(10), &SplitFractions::default(), None).unwrap();
        assert_eq!(part.sizes(), (5, 2, 3));
        assert_eq!(part.train[0].description, "D0");
        assert_eq!(part.validate[2].description, "D9");
    }

    #[test]
    fn rounding_ties_go_to_even() {
        let fractions = SplitFractions {
            train: 0.5,
            test: 0.5,
            validate: 0.0,
        };
        // 5 · 0.5 = 2.5 rounds to 2
        let part = split_entries(entries(5), &fractions, None).unwrap();
        assert_eq!(part.sizes(), (2, 2, 1));
    }

    #[test]
    fn invalid_fractions_are_rejected() {
        let fractions = SplitFractions {
            train: 0.6,
            test: 0.3,
            validate: 0.3,
        };
        let err = split_entries(entries(4), &fractions, None).unwrap_err();
        assert!(matches!(err, Error::InvalidSplit { .. }));
    }

    #[test]
    fn seeded_shuffle_is_reproducible_and_lossless() {
        let a = split_entries(entries(20), &SplitFractions::default(), Some(11)).unwrap();
        let b = split_entries(entries(20), &SplitFractions::default(), Some(11)).unwrap();
        assert_eq!(a, b);

        let mut all: Vec<String> = a
            .train
            .iter()
            .chain(&a.test)
            .chain(&a.validate)
            .map(|e| e.description.clone())
            .collect();
        all.sort();
        let mut expected: Vec<String> = (0..20).map(|i| format!("D{}", i)).collect();
        expected.sort();
        assert_eq!(all, expected);
    }

    #[test]
    fn empty_input_splits_into_empty_parts() {
        let part = split_entries(Vec::new(), &SplitFractions::default(), None).unwrap();
        assert_eq!(part.sizes(), (0, 0, 0));
    }

    #[test]
    fn category_counts_include_unknown() {
        let counts = category_counts(&entries(6));
        assert_eq!(counts[&CategoricalFeature::Project], 4);
        assert_eq!(counts[&CategoricalFeature::Description], 7);
        assert_eq!(counts[&CategoricalFeature::Tags], 2);
    }
}
