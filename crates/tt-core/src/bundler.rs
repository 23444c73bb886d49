//! Chronological bundling of an entry stream.
//!
//! Entries arrive most-recent-first. They are walked oldest to newest and cut
//! into contiguous bundles, each spanning `day_span` calendar-day transitions.
//! Every bundle is later learned as an independent online run.

use chrono::NaiveDate;
use serde::Serialize;
use tt_common::{BundleId, Entry};

/// A contiguous run of entries, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    pub id: BundleId,
    pub entries: Vec<Entry>,
}

impl Bundle {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First and last calendar day covered.
    pub fn day_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.first()?.day();
        let last = self.entries.last()?.day();
        Some((first, last))
    }
}

/// Partition most-recent-first `entries` into bundles, oldest bundle first.
///
/// A `day_span` of zero is treated as one. Never returns an empty bundle.
pub fn bundle_entries(entries: &[Entry], day_span: u32) -> Vec<Bundle> {
    let span = day_span.max(1);
    let mut bundles: Vec<Bundle> = Vec::new();
    let mut current: Vec<Entry> = Vec::new();
    let mut anchor: Option<NaiveDate> = None;
    let mut budget = span;

    for entry in entries.iter().rev() {
        let day = entry.day();
        match anchor {
            Some(previous) if previous != day => {
                anchor = Some(day);
                budget -= 1;
                if budget == 0 {
                    close(&mut bundles, &mut current);
                    budget = span;
                }
            }
            Some(_) => {}
            None => anchor = Some(day),
        }
        current.push(entry.clone());
    }
    close(&mut bundles, &mut current);
    bundles
}

fn close(bundles: &mut Vec<Bundle>, current: &mut Vec<Entry>) {
    if current.is_empty() {
        return;
    }
    bundles.push(Bundle {
        id: BundleId(bundles.len()),
        entries: std::mem::take(current),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry_at;
    use tt_common::Label;

    /// Build most-recent-first input from oldest-first timestamps.
    fn stream(oldest_first: &[&str]) -> Vec<Entry> {
        oldest_first
            .iter()
            .rev()
            .map(|ts| entry_at(ts, Label::NotModified))
            .collect()
    }

    fn days(bundle: &Bundle) -> Vec<u32> {
        bundle.entries.iter().map(|e| e.day_of_month()).collect()
    }

    #[test]
    fn empty_input_yields_no_bundles() {
        assert!(bundle_entries(&[], 7).is_empty());
    }

    #[test]
    fn day_span_one_splits_each_day() {
        let entries = stream(&[
            "2018-03-01T09:00:00Z",
            "2018-03-02T09:00:00Z",
            "2018-03-03T09:00:00Z",
        ]);
        let bundles = bundle_entries(&entries, 1);
        assert_eq!(bundles.len(), 3);
        for (i, bundle) in bundles.iter().enumerate() {
            assert_eq!(bundle.id, BundleId(i));
            assert_eq!(bundle.len(), 1);
        }
        assert_eq!(days(&bundles[0]), vec![1]);
        assert_eq!(days(&bundles[2]), vec![3]);
    }

    #[test]
    fn same_day_entries_never_split() {
        let entries = stream(&[
            "2018-03-01T08:00:00Z",
            "2018-03-01T12:00:00Z",
            "2018-03-01T17:00:00Z",
            "2018-03-02T09:00:00Z",
        ]);
        let bundles = bundle_entries(&entries, 1);
        assert_eq!(bundles.len(), 2);
        assert_eq!(days(&bundles[0]), vec![1, 1, 1]);
        assert_eq!(days(&bundles[1]), vec![2]);
    }

    #[test]
    fn span_counts_day_transitions() {
        let entries = stream(&[
            "2018-03-01T09:00:00Z",
            "2018-03-02T09:00:00Z",
            "2018-03-04T09:00:00Z",
            "2018-03-05T09:00:00Z",
            "2018-03-05T10:00:00Z",
            "2018-03-09T09:00:00Z",
        ]);
        let bundles = bundle_entries(&entries, 2);
        let shape: Vec<Vec<u32>> = bundles.iter().map(days).collect();
        assert_eq!(shape, vec![vec![1, 2], vec![4, 5, 5], vec![9]]);
    }

    #[test]
    fn same_day_of_month_in_different_months_is_a_transition() {
        let entries = stream(&["2018-03-01T09:00:00Z", "2018-04-01T09:00:00Z"]);
        let bundles = bundle_entries(&entries, 1);
        assert_eq!(bundles.len(), 2);
    }

    #[test]
    fn bundles_preserve_every_entry_in_order() {
        let entries = stream(&[
            "2018-03-01T09:00:00Z",
            "2018-03-03T09:00:00Z",
            "2018-03-06T09:00:00Z",
            "2018-03-07T09:00:00Z",
        ]);
        let bundles = bundle_entries(&entries, 3);
        let flattened: Vec<Entry> = bundles.into_iter().flat_map(|b| b.entries).collect();
        let oldest_first: Vec<Entry> = entries.into_iter().rev().collect();
        assert_eq!(flattened, oldest_first);
    }

    #[test]
    fn day_range_covers_first_and_last() {
        let entries = stream(&["2018-03-01T09:00:00Z", "2018-03-02T09:00:00Z"]);
        let bundle = &bundle_entries(&entries, 7)[0];
        let (first, last) = bundle.day_range().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2018, 3, 2).unwrap());
    }
}
