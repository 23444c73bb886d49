//! Modified Bessel function of the first kind, order zero.
//!
//! `I0` is the normalizing constant of the von Mises density:
//! `f(x | μ, κ) = exp(κ cos(x - μ)) / (2π I0(κ))`.
//!
//! Small arguments use the power series `Σ (x/2)^(2k) / (k!)^2`, which
//! converges to machine precision quickly. Large arguments use the
//! Hankel asymptotic expansion in log domain so that `ln I0(x)` stays finite
//! long after `I0(x)` itself overflows (around x ≈ 713).

use std::f64::consts::PI;

/// Switch-over point between the power series and the asymptotic expansion.
const SERIES_LIMIT: f64 = 30.0;
const SERIES_MAX_TERMS: usize = 500;
const ASYMPTOTIC_MAX_TERMS: usize = 30;
const EPS: f64 = 1e-17;

/// Power series for I0. Only accurate for moderate `x`.
fn series_i0(x: f64) -> f64 {
    let q = 0.25 * x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..=SERIES_MAX_TERMS {
        let kf = k as f64;
        term *= q / (kf * kf);
        sum += term;
        if term < EPS * sum {
            break;
        }
    }
    sum
}

/// `ln(e^(-x) sqrt(2πx) I0(x))` from the asymptotic series
/// `Σ ((2k-1)!!)^2 / (k! (8x)^k)`.
fn log_asymptotic_correction(x: f64) -> f64 {
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..=ASYMPTOTIC_MAX_TERMS {
        let kf = k as f64;
        let odd = 2.0 * kf - 1.0;
        let next = term * odd * odd / (8.0 * kf * x);
        // Asymptotic series: stop once terms start growing again.
        if next > term {
            break;
        }
        term = next;
        sum += term;
        if term < EPS * sum {
            break;
        }
    }
    sum.ln()
}

/// Modified Bessel function `I0(x)`.
///
/// Even in `x`; returns `+inf` once the result exceeds `f64::MAX`.
pub fn bessel_i0(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax.is_infinite() {
        return f64::INFINITY;
    }
    if ax <= SERIES_LIMIT {
        return series_i0(ax);
    }
    log_bessel_i0(ax).exp()
}

/// Natural log of `I0(x)`, finite for every finite `x`.
pub fn log_bessel_i0(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let ax = x.abs();
    if ax.is_infinite() {
        return f64::INFINITY;
    }
    if ax <= SERIES_LIMIT {
        return series_i0(ax).ln();
    }
    ax - 0.5 * (2.0 * PI * ax).ln() + log_asymptotic_correction(ax)
}

/// `ln(I0(a) / I0(b))` without forming either Bessel value.
pub fn log_bessel_i0_ratio(a: f64, b: f64) -> f64 {
    log_bessel_i0(a) - log_bessel_i0(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn i0_known_values() {
        assert_eq!(bessel_i0(0.0), 1.0);
        assert!(rel_eq(bessel_i0(1.0), 1.266_065_877_752_008_4, 1e-14));
        assert!(rel_eq(bessel_i0(2.0), 2.279_585_302_336_067_3, 1e-14));
        assert!(rel_eq(bessel_i0(5.0), 27.239_871_823_604_442, 1e-13));
        assert!(rel_eq(bessel_i0(10.0), 2_815.716_628_466_254, 1e-13));
    }

    #[test]
    fn i0_is_even() {
        for x in [0.5, 3.0, 12.0, 45.0] {
            assert_eq!(bessel_i0(x), bessel_i0(-x));
        }
    }

    #[test]
    fn log_i0_continuous_across_switch_over() {
        let below = log_bessel_i0(SERIES_LIMIT);
        let above = log_bessel_i0(SERIES_LIMIT + 1e-9);
        assert!(rel_eq(below, above, 1e-10), "{below} vs {above}");
    }

    #[test]
    fn asymptotic_matches_series_where_both_apply() {
        for x in [35.0, 50.0, 80.0] {
            let series = series_i0(x).ln();
            let asym = log_bessel_i0(x);
            assert!(rel_eq(series, asym, 1e-12), "x={x}: {series} vs {asym}");
        }
    }

    #[test]
    fn log_i0_finite_where_i0_overflows() {
        assert!(bessel_i0(1000.0).is_infinite());
        let l = log_bessel_i0(1000.0);
        assert!(l.is_finite());
        assert!(l > 990.0 && l < 1000.0);
    }

    #[test]
    fn ratio_is_antisymmetric() {
        let r = log_bessel_i0_ratio(3.0, 7.0);
        assert!(rel_eq(r, -log_bessel_i0_ratio(7.0, 3.0), 1e-15));
        assert_eq!(log_bessel_i0_ratio(4.2, 4.2), 0.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(bessel_i0(f64::NAN).is_nan());
        assert!(log_bessel_i0(f64::NAN).is_nan());
    }
}
