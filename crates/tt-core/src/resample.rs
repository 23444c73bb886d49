//! Bootstrap resampling over bundle summaries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tt_common::{BundleId, Error, Result};

use crate::learn::BundleSummary;
use crate::log_event;
use crate::logging::{event_names, LogContext, Stage};

/// Resampling parameters taken from the model config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleOptions {
    pub samples: usize,
    /// Random when absent; the seed actually used is reported back.
    pub seed: Option<u64>,
    pub exclude_single_class_bundles: bool,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        ResampleOptions {
            samples: 100,
            seed: None,
            exclude_single_class_bundles: false,
        }
    }
}

impl From<&tt_config::ModelConfig> for ResampleOptions {
    fn from(config: &tt_config::ModelConfig) -> Self {
        ResampleOptions {
            samples: config.samples,
            seed: config.seed,
            exclude_single_class_bundles: config.exclude_single_class_bundles,
        }
    }
}

/// One bootstrap sample: the drawn bundles and their mean statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Drawn bundle ids, duplicates included.
    pub seeds: Vec<BundleId>,
    pub error: f64,
    pub entropy: f64,
    pub f1: f64,
    pub f2: f64,
}

impl Dataset {
    /// Average the drawn bundles' statistics. An empty draw averages to zero.
    fn from_draw(seeds: Vec<BundleId>, drawn: &[&BundleSummary]) -> Self {
        let n = drawn.len().max(1) as f64;
        let stat = |f: fn(&BundleSummary) -> f64| drawn.iter().map(|b| f(b)).sum::<f64>() / n;
        Dataset {
            seeds,
            error: stat(|b| b.error_rate),
            entropy: stat(|b| b.entropy_rate),
            f1: stat(|b| b.f1),
            f2: stat(|b| b.f2),
        }
    }
}

/// All samples of one resampling pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResampleOutcome {
    pub seed: u64,
    /// Bundles dropped as single-class before sampling.
    pub excluded: usize,
    pub datasets: Vec<Dataset>,
}

/// Draw `options.samples` bootstrap samples of the bundle summaries.
///
/// Each sample draws as many bundles as the pool holds, uniformly with
/// replacement.
pub fn resample(
    summaries: &[BundleSummary],
    options: &ResampleOptions,
    ctx: &LogContext,
) -> Result<ResampleOutcome> {
    let pool: Vec<&BundleSummary> = summaries
        .iter()
        .filter(|b| !(options.exclude_single_class_bundles && b.single_class))
        .collect();
    let excluded = summaries.len() - pool.len();

    if excluded > 0 {
        log_event!(
            ctx,
            INFO,
            event_names::RESAMPLE_EXCLUDED,
            Stage::Resample,
            "single-class bundles excluded",
            excluded = excluded as u64
        );
    }
    if pool.is_empty() {
        return Err(Error::EmptyDataset(
            "no bundles available for resampling".to_string(),
        ));
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let n = pool.len();

    let mut datasets = Vec::with_capacity(options.samples);
    for _ in 0..options.samples {
        let drawn: Vec<&BundleSummary> = (0..n).map(|_| pool[rng.random_range(0..n)]).collect();
        let seeds = drawn.iter().map(|b| b.id).collect();
        datasets.push(Dataset::from_draw(seeds, &drawn));
    }

    log_event!(
        ctx,
        INFO,
        event_names::RESAMPLE_FINISHED,
        Stage::Resample,
        "resampling finished",
        samples = datasets.len() as u64,
        pool = n as u64,
        seed = seed
    );

    Ok(ResampleOutcome {
        seed,
        excluded,
        datasets,
    })
}
