//! Min-max normalization shared by the performance scorer.

/// Maps every value into `[0, 1]` relative to the pool's min and max.
///
/// A pool with no spread (including a single value) normalizes to all `1.0`.
/// Non-finite values are read as `0.0` before the range is taken.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let cleaned: Vec<f64> = values.iter().map(|v| finite_or_zero(*v)).collect();

    let min = cleaned.iter().copied().fold(f64::INFINITY, f64::min);
    let max = cleaned.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let spread = max - min;

    cleaned
        .iter()
        .map(|v| if spread > 0.0 { (v - min) / spread } else { 1.0 })
        .collect()
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
