//! Descriptive statistics that skip missing values.
//!
//! Every function ignores `NaN` entries. Results for inputs with no usable
//! values follow the sentinel convention: `NaN` for mean, median and
//! standard deviation, `0.0` for the sum, `+∞`/`-∞` for min/max.
//!
//! # Examples
//!
//! ```
//! use u_statfit::descriptive::{mean, median, sum};
//!
//! let data = [54.0, 93.0, 87.0, 3.5, 10.0, 12.0];
//! assert_eq!(sum(&data), 259.5);
//! assert_eq!(mean(&data), 43.25);
//! assert_eq!(median(&data), 33.0);
//! ```

use u_numflow::stats;

/// Copies the non-`NaN` values of `values`.
pub(crate) fn present(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Sum of the non-`NaN` values (compensated summation).
pub fn sum(values: &[f64]) -> f64 {
    stats::kahan_sum(&present(values))
}

/// Arithmetic mean of the non-`NaN` values.
pub fn mean(values: &[f64]) -> f64 {
    let data = present(values);
    if data.is_empty() {
        return f64::NAN;
    }
    stats::kahan_sum(&data) / data.len() as f64
}

/// Smallest non-`NaN` value, or `+∞` when there is none.
pub fn min(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(f64::INFINITY, |acc, &v| acc.min(v))
}

/// Largest non-`NaN` value, or `-∞` when there is none.
pub fn max(values: &[f64]) -> f64 {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
}

/// Median of the non-`NaN` values; the mean of the middle pair for an even
/// count.
pub fn median(values: &[f64]) -> f64 {
    stats::median(&present(values)).unwrap_or(f64::NAN)
}

/// Sample standard deviation (denominator n − 1) of the non-`NaN` values.
///
/// `NaN` for fewer than two values or when an infinite value is present.
pub fn standard_deviation(values: &[f64]) -> f64 {
    stats::std_dev(&present(values)).unwrap_or(f64::NAN)
}
