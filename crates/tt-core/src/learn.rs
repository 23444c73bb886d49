//! Online learning over bundles.
//!
//! Each bundle starts from fresh posteriors and is scored entry by entry.
//! Bundles are independent, so they run in parallel; results come back in
//! bundle order.

use rayon::prelude::*;
use serde::Serialize;
use tt_common::{BundleId, Entry, Error, Result};

use crate::bundler::{bundle_entries, Bundle};
use crate::evaluate::{ConfusionMatrix, RunningStats};
use crate::inference::{Contributions, GuardStats, Kappa, ModelState};
use crate::log_event;
use crate::logging::{event_names, LogContext, Stage};

/// Learning parameters taken from the model config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearnOptions {
    pub day_span: u32,
    pub report_every: usize,
}

impl Default for LearnOptions {
    fn default() -> Self {
        LearnOptions {
            day_span: 7,
            report_every: 50,
        }
    }
}

impl From<&tt_config::ModelConfig> for LearnOptions {
    fn from(config: &tt_config::ModelConfig) -> Self {
        LearnOptions {
            day_span: config.day_span,
            report_every: config.report_every,
        }
    }
}

/// An entry with the values computed while learning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub entry: Entry,
    pub probability: f64,
    /// Bundle error rate after this entry.
    pub error: f64,
    /// Bundle entropy rate after this entry.
    pub entropy: f64,
    pub bundle: BundleId,
    /// Per-feature breakdown. Not persisted; zero for reloaded rows.
    #[serde(skip)]
    pub contributions: Contributions,
}

/// Terminal statistics of one bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleSummary {
    pub id: BundleId,
    pub entries: usize,
    pub error_rate: f64,
    pub entropy_rate: f64,
    pub confusion: ConfusionMatrix,
    pub f1: f64,
    pub f2: f64,
    pub single_class: bool,
    pub guards: GuardStats,
}

impl BundleSummary {
    fn empty(id: BundleId, guards: GuardStats) -> Self {
        BundleSummary {
            id,
            entries: 0,
            error_rate: 0.0,
            entropy_rate: 0.0,
            confusion: ConfusionMatrix::default(),
            f1: 0.0,
            f2: 0.0,
            single_class: true,
            guards,
        }
    }

    /// Summarize the scored entries of one bundle, in order.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_scored(id: BundleId, scored: &[ScoredEntry], guards: GuardStats) -> Option<Self> {
        let last = scored.last()?;
        let confusion =
            ConfusionMatrix::from_scored(scored.iter().map(|s| (s.entry.modified, s.probability)));
        Some(BundleSummary {
            id,
            entries: scored.len(),
            error_rate: last.error,
            entropy_rate: last.entropy,
            f1: confusion.f1(),
            f2: confusion.f2(),
            single_class: confusion.is_single_class(),
            confusion,
            guards,
        })
    }
}

/// One learned bundle.
#[derive(Debug, Clone)]
pub struct BundleOutcome {
    pub summary: BundleSummary,
    pub scored: Vec<ScoredEntry>,
}

/// Result of learning a whole dataset.
#[derive(Debug, Clone)]
pub struct LearnOutcome {
    pub kappa: Kappa,
    pub bundles: Vec<BundleOutcome>,
}

impl LearnOutcome {
    pub fn summaries(&self) -> Vec<BundleSummary> {
        self.bundles.iter().map(|b| b.summary.clone()).collect()
    }

    /// Scored entries across all bundles, oldest first.
    pub fn scored(&self) -> impl Iterator<Item = &ScoredEntry> {
        self.bundles.iter().flat_map(|b| b.scored.iter())
    }

    pub fn guards(&self) -> GuardStats {
        let mut total = GuardStats::default();
        for bundle in &self.bundles {
            total.merge(&bundle.summary.guards);
        }
        total
    }
}

/// Learn one bundle from fresh posteriors.
pub fn learn_bundle(
    bundle: &Bundle,
    kappa: &Kappa,
    options: &LearnOptions,
    ctx: &LogContext,
) -> BundleOutcome {
    let span = tracing::debug_span!("bundle", bundle = bundle.id.0 as u64);
    let _enter = span.enter();

    let mut state = ModelState::new();
    let mut stats: Option<RunningStats> = None;
    let mut scored = Vec::with_capacity(bundle.len());
    let report_every = options.report_every.max(1);

    for entry in &bundle.entries {
        let (next, contributions) = state.update(entry, kappa);
        state = next;

        let probability = contributions.probability();
        let running = RunningStats::advance(stats.as_ref(), entry.modified, probability);
        stats = Some(running);

        if running.count % report_every == 0 {
            log_event!(
                ctx,
                DEBUG,
                event_names::LEARN_PROGRESS,
                Stage::Evaluate,
                "bundle progress",
                position = running.count as u64,
                probability = probability,
                error = running.error_rate
            );
        }

        scored.push(ScoredEntry {
            entry: entry.clone(),
            probability,
            error: running.error_rate,
            entropy: running.entropy_rate,
            bundle: bundle.id,
            contributions,
        });
    }

    if state.guards.total() > 0 {
        log_event!(
            ctx,
            DEBUG,
            event_names::LEARN_GUARD_CLAMPED,
            Stage::Learn,
            "posterior updates floored",
            concentration = state.guards.concentration_clamps,
            direction = state.guards.direction_clamps,
            rate = state.guards.rate_clamps
        );
    }

    let summary = BundleSummary::from_scored(bundle.id, &scored, state.guards)
        .unwrap_or_else(|| BundleSummary::empty(bundle.id, state.guards));

    log_event!(
        ctx,
        INFO,
        event_names::LEARN_BUNDLE_DONE,
        Stage::Learn,
        "bundle learned",
        entries = summary.entries as u64,
        error = summary.error_rate,
        entropy = summary.entropy_rate,
        single_class = summary.single_class
    );

    BundleOutcome { summary, scored }
}

/// Bundle most-recent-first `entries` and learn every bundle.
pub fn learn(entries: &[Entry], options: &LearnOptions, ctx: &LogContext) -> Result<LearnOutcome> {
    let kappa = Kappa::from_entries(entries)
        .ok_or_else(|| Error::EmptyDataset("no entries to learn from".to_string()))?;

    log_event!(
        ctx,
        INFO,
        event_names::LEARN_KAPPA,
        Stage::Learn,
        "concentration rates computed",
        kappa_start = kappa.start,
        kappa_end = kappa.end
    );

    let bundles = bundle_entries(entries, options.day_span);
    log_event!(
        ctx,
        INFO,
        event_names::LEARN_STARTED,
        Stage::Learn,
        "learning bundles",
        entries = entries.len() as u64,
        bundles = bundles.len() as u64,
        day_span = options.day_span as u64
    );

    let outcomes: Vec<BundleOutcome> = bundles
        .par_iter()
        .map(|bundle| learn_bundle(bundle, &kappa, options, ctx))
        .collect();

    let outcome = LearnOutcome {
        kappa,
        bundles: outcomes,
    };
    let guards = outcome.guards();
    log_event!(
        ctx,
        INFO,
        event_names::LEARN_FINISHED,
        Stage::Learn,
        "learning finished",
        bundles = outcome.bundles.len() as u64,
        guard_clamps = guards.total()
    );

    Ok(outcome)
}

/// Regroup reloaded scored entries by bundle id and summarize each bundle.
///
/// Entries of a bundle must appear in their original order.
pub fn summarize_scored(scored: &[ScoredEntry]) -> Vec<BundleSummary> {
    let mut groups: std::collections::BTreeMap<BundleId, Vec<ScoredEntry>> =
        std::collections::BTreeMap::new();
    for s in scored {
        groups.entry(s.bundle).or_default().push(s.clone());
    }
    groups
        .into_iter()
        .filter_map(|(id, rows)| BundleSummary::from_scored(id, &rows, GuardStats::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry_at;
    use tt_common::Label;

    fn ctx() -> LogContext {
        LogContext::new("tt-test")
    }

    fn week(labels: &[(&str, Label)]) -> Vec<Entry> {
        labels
            .iter()
            .rev()
            .map(|(ts, label)| entry_at(ts, *label))
            .collect()
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let err = learn(&[], &LearnOptions::default(), &ctx()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn scored_entries_follow_bundles_in_order() {
        let entries = week(&[
            ("2018-03-01T09:00:00Z", Label::Modified),
            ("2018-03-01T11:00:00Z", Label::NotModified),
            ("2018-03-02T09:00:00Z", Label::Modified),
            ("2018-03-03T14:00:00Z", Label::NotModified),
        ]);
        let options = LearnOptions {
            day_span: 1,
            report_every: 1,
        };
        let outcome = learn(&entries, &options, &ctx()).unwrap();
        assert_eq!(outcome.bundles.len(), 3);

        let ids: Vec<usize> = outcome.scored().map(|s| s.bundle.0).collect();
        assert_eq!(ids, vec![0, 0, 1, 2]);
        for s in outcome.scored() {
            assert!(s.probability > 0.0 && s.probability < 1.0);
        }
    }

    #[test]
    fn summary_matches_last_running_stats() {
        let entries = week(&[
            ("2018-03-01T09:00:00Z", Label::Modified),
            ("2018-03-01T11:00:00Z", Label::NotModified),
            ("2018-03-01T15:00:00Z", Label::Modified),
        ]);
        let outcome = learn(&entries, &LearnOptions::default(), &ctx()).unwrap();
        let bundle = &outcome.bundles[0];
        let last = bundle.scored.last().unwrap();
        assert_eq!(bundle.summary.entries, 3);
        assert_eq!(bundle.summary.error_rate, last.error);
        assert_eq!(bundle.summary.entropy_rate, last.entropy);
        assert_eq!(bundle.summary.confusion.total(), 3);
    }

    #[test]
    fn first_entry_of_each_bundle_starts_fresh() {
        let entries = week(&[
            ("2018-03-01T09:00:00Z", Label::Modified),
            ("2018-03-02T09:00:00Z", Label::Modified),
        ]);
        let options = LearnOptions {
            day_span: 1,
            report_every: 50,
        };
        let outcome = learn(&entries, &options, &ctx()).unwrap();
        let first = &outcome.bundles[0].scored[0];
        let second = &outcome.bundles[1].scored[0];
        assert_eq!(first.contributions.categorical, second.contributions.categorical);
    }

    #[test]
    fn summarize_scored_regroups_by_bundle() {
        let entries = week(&[
            ("2018-03-01T09:00:00Z", Label::Modified),
            ("2018-03-02T09:00:00Z", Label::NotModified),
            ("2018-03-02T10:00:00Z", Label::NotModified),
        ]);
        let options = LearnOptions {
            day_span: 1,
            report_every: 50,
        };
        let outcome = learn(&entries, &options, &ctx()).unwrap();
        let scored: Vec<ScoredEntry> = outcome.scored().cloned().collect();
        let summaries = summarize_scored(&scored);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].entries, 2);
        assert_eq!(summaries[1].error_rate, outcome.bundles[1].summary.error_rate);
        assert!(summaries[0].single_class);
    }
}
