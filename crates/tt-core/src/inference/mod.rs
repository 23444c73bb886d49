//! Online per-feature posteriors and their fusion.
//!
//! A [`ModelState`] is created fresh for each bundle and threaded by value
//! from one entry to the next:
//!
//! ```ignore
//! let (state, contributions) = state.update(&entry, &kappa);
//! ```
//!
//! Nothing is stored on the entry records themselves.

pub mod categorical;
pub mod circular;
pub mod duration;
pub mod fusion;

pub use categorical::{CategoricalState, Counts, FeatureTable};
pub use circular::{CircularState, VonMises, CONCENTRATION_FLOOR, DIRECTION_FLOOR};
pub use duration::{DurationState, ShapeRate, RATE_FLOOR};
pub use fusion::{classify, fuse, Contributions, DECISION_THRESHOLD};

use serde::{Deserialize, Serialize};
use tt_common::{Entry, TimeField};
use tt_math::{angle_variance, concentration_rate, hour_to_angle};

/// Counts of posterior updates that had to be floored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStats {
    pub concentration_clamps: u64,
    pub direction_clamps: u64,
    pub rate_clamps: u64,
}

impl GuardStats {
    pub fn total(&self) -> u64 {
        self.concentration_clamps + self.direction_clamps + self.rate_clamps
    }

    pub fn merge(&mut self, other: &GuardStats) {
        self.concentration_clamps += other.concentration_clamps;
        self.direction_clamps += other.direction_clamps;
        self.rate_clamps += other.rate_clamps;
    }
}

/// Concentration learning rates for the two time fields.
///
/// Computed once per run over the whole dataset and shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kappa {
    pub start: f64,
    pub end: f64,
}

impl Kappa {
    /// `1 / (2·var)` of the angle-mapped hours of each time field.
    ///
    /// Returns `None` for an empty dataset.
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        let rate = |field: TimeField| -> Option<f64> {
            let angles: Vec<f64> = entries
                .iter()
                .map(|e| hour_to_angle(e.hour(field)))
                .collect();
            angle_variance(&angles).map(concentration_rate)
        };
        Some(Kappa {
            start: rate(TimeField::Start)?,
            end: rate(TimeField::End)?,
        })
    }

    pub fn get(&self, field: TimeField) -> f64 {
        match field {
            TimeField::Start => self.start,
            TimeField::End => self.end,
        }
    }
}

/// All posterior state for one bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub categorical: CategoricalState,
    pub start: CircularState,
    pub end: CircularState,
    pub duration: DurationState,
    pub guards: GuardStats,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one entry into every feature posterior.
    pub fn update(self, entry: &Entry, kappa: &Kappa) -> (Self, Contributions) {
        let ModelState {
            categorical,
            start,
            end,
            duration,
            mut guards,
        } = self;
        let label = entry.modified;

        let (categorical, categorical_term) = categorical.update(entry);
        let (start, start_term) = start.update(
            kappa.start,
            hour_to_angle(entry.hour(TimeField::Start)),
            label,
            &mut guards,
        );
        let (end, end_term) = end.update(
            kappa.end,
            hour_to_angle(entry.hour(TimeField::End)),
            label,
            &mut guards,
        );
        let (duration, duration_term) = duration.update(entry.duration_weeks(), label, &mut guards);

        (
            ModelState {
                categorical,
                start,
                end,
                duration,
                guards,
            },
            Contributions {
                categorical: categorical_term,
                start: start_term,
                end: end_term,
                duration: duration_term,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entry_at, entry_with};
    use tt_common::Label;

    #[test]
    fn kappa_of_empty_dataset_is_none() {
        assert!(Kappa::from_entries(&[]).is_none());
    }

    #[test]
    fn kappa_is_finite_for_single_hour() {
        let entries = vec![
            entry_at("2018-03-01T09:00:00Z", Label::Modified),
            entry_at("2018-03-02T09:00:00Z", Label::NotModified),
        ];
        let kappa = Kappa::from_entries(&entries).unwrap();
        assert!(kappa.start.is_finite() && kappa.start > 0.0);
    }

    #[test]
    fn kappa_matches_population_variance() {
        // Hours 0 and 12 map to 0 and π: variance π²/4, κ = 2/π²
        let entries = vec![
            entry_at("2018-03-01T00:00:00Z", Label::Modified),
            entry_at("2018-03-01T12:00:00Z", Label::Modified),
        ];
        let kappa = Kappa::from_entries(&entries).unwrap();
        let expected = 2.0 / (std::f64::consts::PI * std::f64::consts::PI);
        assert!((kappa.start - expected).abs() < 1e-12);
    }

    #[test]
    fn state_threads_through_updates() {
        let kappa = Kappa { start: 0.5, end: 0.5 };
        let e = entry_with("P", "D", "T", Label::Modified);
        let (state, first) = ModelState::new().update(&e, &kappa);
        let (state, second) = state.update(&e, &kappa);

        assert!(first.probability() > 0.5);
        assert!(second.categorical > first.categorical);
        assert_eq!(state.duration.class(Label::Modified).shape, 3.0);
    }

    #[test]
    fn guard_stats_merge() {
        let mut a = GuardStats {
            concentration_clamps: 1,
            direction_clamps: 0,
            rate_clamps: 2,
        };
        a.merge(&GuardStats {
            concentration_clamps: 3,
            direction_clamps: 1,
            rate_clamps: 0,
        });
        assert_eq!(a.total(), 7);
    }
}
