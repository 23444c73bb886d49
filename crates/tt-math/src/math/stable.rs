//! Numerically stable primitives for log-odds fusion.

/// Smallest probability the classifier may report.
///
/// The evaluator takes `ln((1 - p) / p)`, so probabilities of exactly 0 or 1
/// would turn a single confident miss into an infinite loss.
pub const PROBABILITY_EPS: f64 = 1e-12;

/// Logistic sigmoid `1 / (1 + e^(-x))`.
///
/// Branches on the sign of `x` so that `exp` is only ever evaluated on a
/// non-positive argument and never overflows.
pub fn logistic(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Clamp a probability into `[PROBABILITY_EPS, 1 - PROBABILITY_EPS]`.
///
/// NaN is passed through unchanged so callers can still detect it.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        return p;
    }
    p.clamp(PROBABILITY_EPS, 1.0 - PROBABILITY_EPS)
}

/// Logistic sigmoid clamped strictly inside `(0, 1)`.
pub fn bounded_logistic(x: f64) -> f64 {
    clamp_probability(logistic(x))
}

/// `ln(num / den)` computed as a difference of logs.
///
/// Returns NaN when either argument is non-positive.
pub fn log_ratio(num: f64, den: f64) -> f64 {
    if num.is_nan() || den.is_nan() || num <= 0.0 || den <= 0.0 {
        return f64::NAN;
    }
    num.ln() - den.ln()
}

/// Log-odds `ln(p / (1 - p))`.
pub fn log_odds(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    p.ln() - (-p).ln_1p()
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
