//! Von Mises posterior for a 24-hour cyclic time feature.
//!
//! Each class keeps a concentration `a` and a direction `b`. An observation
//! only moves the pair of its own class. Updates that leave the valid
//! parameter space are floored and counted in [`GuardStats`].

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use tt_common::Label;
use tt_math::{guard_half_open, guard_positive, log_bessel_i0_ratio};

use super::GuardStats;

/// Floor applied to a non-positive or non-finite concentration.
pub const CONCENTRATION_FLOOR: f64 = 0.001;

/// Floor applied to a direction outside `(0, 2π]`.
pub const DIRECTION_FLOOR: f64 = 0.001;

/// Concentration/direction pair for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VonMises {
    pub concentration: f64,
    pub direction: f64,
}

impl Default for VonMises {
    fn default() -> Self {
        VonMises {
            concentration: PI,
            direction: 1.0 / (2.0 * PI * PI),
        }
    }
}

impl VonMises {
    /// Fold one observed angle `x` into the pair with learning rate `kappa`.
    ///
    /// The direction is `2·atan(s/c) + π`, which lands in `[0, 2π]`. A zero
    /// `c` sends the ratio to ±∞; the `−∞` side yields exactly zero and is
    /// floored like any other out-of-range value.
    fn absorb(self, kappa: f64, x: f64, guards: &mut GuardStats) -> Self {
        let sin_part = self.concentration * self.direction.sin() + x.sin();
        let cos_part = self.concentration * self.direction.cos() + x.cos();

        let concentration = guard_positive(kappa * sin_part, CONCENTRATION_FLOOR);
        let direction = guard_half_open(
            2.0 * (sin_part / cos_part).atan() + PI,
            0.0,
            TAU,
            DIRECTION_FLOOR,
        );

        if concentration.clamped {
            guards.concentration_clamps += 1;
        }
        if direction.clamped {
            guards.direction_clamps += 1;
        }

        VonMises {
            concentration: concentration.value,
            direction: direction.value,
        }
    }

    fn weighted_cosine(&self, x: f64) -> f64 {
        self.concentration * (x - self.direction).cos()
    }
}

/// Per-class von Mises state for one time field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CircularState {
    /// Indexed by [`Label::class_index`].
    pub classes: [VonMises; 2],
}

impl CircularState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, label: Label) -> &VonMises {
        &self.classes[label.class_index()]
    }

    /// Absorb angle `x` into the entry's class and return the contribution.
    pub fn update(
        mut self,
        kappa: f64,
        x: f64,
        label: Label,
        guards: &mut GuardStats,
    ) -> (Self, f64) {
        let idx = label.class_index();
        self.classes[idx] = self.classes[idx].absorb(kappa, x, guards);
        let contribution = self.contribution(x);
        (self, contribution)
    }

    /// `a1·cos(x−b1) − a0·cos(x−b0) + ln(I0(a0)/I0(a1))`.
    pub fn contribution(&self, x: f64) -> f64 {
        let [not_modified, modified] = self.classes;
        modified.weighted_cosine(x) - not_modified.weighted_cosine(x)
            + log_bessel_i0_ratio(not_modified.concentration, modified.concentration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_math::hour_to_angle;

    #[test]
    fn prior_contribution_is_zero() {
        let state = CircularState::new();
        for hour in [0, 6, 13, 23] {
            assert!(state.contribution(hour_to_angle(hour)).abs() < 1e-12);
        }
    }

    #[test]
    fn update_moves_only_the_labelled_class() {
        let mut guards = GuardStats::default();
        let (state, _) =
            CircularState::new().update(0.5, hour_to_angle(9), Label::Modified, &mut guards);
        assert_eq!(*state.class(Label::NotModified), VonMises::default());
        assert_ne!(*state.class(Label::Modified), VonMises::default());
    }

    #[test]
    fn update_follows_closed_form() {
        let mut guards = GuardStats::default();
        let kappa = 0.8;
        let x = hour_to_angle(9);
        let prior = VonMises::default();
        let s = prior.concentration * prior.direction.sin() + x.sin();
        let c = prior.concentration * prior.direction.cos() + x.cos();

        let (state, _) = CircularState::new().update(kappa, x, Label::NotModified, &mut guards);
        let updated = state.class(Label::NotModified);
        assert!((updated.concentration - kappa * s).abs() < 1e-12);
        assert!((updated.direction - (2.0 * (s / c).atan() + PI)).abs() < 1e-12);
        assert!((updated.direction - 3.8263075278197642).abs() < 1e-12);
        assert_eq!(guards.total(), 0);
    }

    #[test]
    fn zero_direction_is_floored_and_counted() {
        let mut guards = GuardStats::default();
        // cos(b) rounds to exactly -1, so c = 0 while s < 0 and the ratio is -inf
        let state = CircularState {
            classes: [
                VonMises::default(),
                VonMises {
                    concentration: 1.0,
                    direction: PI + 1e-9,
                },
            ],
        };
        let (state, contribution) =
            state.update(-1.0, hour_to_angle(0), Label::Modified, &mut guards);
        let updated = state.class(Label::Modified);
        assert_eq!(updated.direction, DIRECTION_FLOOR);
        assert!(updated.concentration > 0.0 && updated.concentration < 1e-8);
        assert_eq!(guards.direction_clamps, 1);
        assert_eq!(guards.concentration_clamps, 0);
        assert!(contribution.is_finite());
    }

    #[test]
    fn negative_concentration_is_floored_and_counted() {
        let mut guards = GuardStats::default();
        // sin(18h) = -1 dominates the small positive prior term
        let (state, contribution) =
            CircularState::new().update(1.0, hour_to_angle(18), Label::Modified, &mut guards);
        assert_eq!(state.class(Label::Modified).concentration, CONCENTRATION_FLOOR);
        assert_eq!(guards.concentration_clamps, 1);
        assert!(contribution.is_finite());
    }

    #[test]
    fn contribution_favours_the_class_concentrated_near_x() {
        let state = CircularState {
            classes: [
                VonMises {
                    concentration: 2.0,
                    direction: PI,
                },
                VonMises {
                    concentration: 2.0,
                    direction: hour_to_angle(9),
                },
            ],
        };
        assert!(state.contribution(hour_to_angle(9)) > 0.0);
        assert!(state.contribution(PI) < 0.0);
    }
}
