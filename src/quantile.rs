//! Quartiles, the "regular range" fence, and outliers.
//!
//! The regular range is the quartile range widened about its center by
//! [`REGULAR_RANGE_SCALE`]. Values outside it are outliers.
//!
//! # Examples
//!
//! ```
//! use u_statfit::quantile::{first_quartile, third_quartile, regular_range, outliers};
//!
//! let data = [54.0, 93.0, 87.0, 3.5, 10.0, 12.0];
//! assert_eq!(first_quartile(&data), 8.375);
//! assert_eq!(third_quartile(&data), 88.5);
//!
//! let fence = regular_range(&data);
//! assert_eq!(fence.min(), -111.8125);
//! assert_eq!(fence.max(), 208.6875);
//! assert!(outliers(&data).is_empty());
//! ```

use crate::descriptive::present;
use crate::range::Range;

/// Factor by which the quartile range is scaled to obtain the regular range.
///
/// Scaling the width by 4 about the center places each fence 1.5 IQR beyond
/// its quartile.
pub const REGULAR_RANGE_SCALE: f64 = 4.0;

fn sorted_present(values: &[f64]) -> Vec<f64> {
    let mut sorted = present(values);
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Order statistic at 1-based position `p·(n+1)`, linearly interpolated
/// between neighbours and clamped to the extremes.
fn order_statistic(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let position = p * (n + 1) as f64;
    if position <= 1.0 {
        return sorted[0];
    }
    if position >= n as f64 {
        return sorted[n - 1];
    }
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    let below = sorted[lower - 1];
    below + fraction * (sorted[lower] - below)
}

/// First quartile of the non-`NaN` values; `NaN` if there are none.
pub fn first_quartile(values: &[f64]) -> f64 {
    order_statistic(&sorted_present(values), 0.25)
}

/// Third quartile of the non-`NaN` values; `NaN` if there are none.
pub fn third_quartile(values: &[f64]) -> f64 {
    order_statistic(&sorted_present(values), 0.75)
}

/// Difference between the third and first quartiles.
pub fn interquartile_range(values: &[f64]) -> f64 {
    quartile_range(values).size()
}

/// `[first_quartile, third_quartile]`.
pub fn quartile_range(values: &[f64]) -> Range {
    let sorted = sorted_present(values);
    Range::new(order_statistic(&sorted, 0.25), order_statistic(&sorted, 0.75))
}

/// The quartile range scaled by [`REGULAR_RANGE_SCALE`] about its center.
///
/// Both bounds are `NaN` when `values` has no non-`NaN` entries.
pub fn regular_range(values: &[f64]) -> Range {
    quartile_range(values).scale(REGULAR_RANGE_SCALE)
}

/// Lower bound of [`regular_range`].
pub fn min_regular(values: &[f64]) -> f64 {
    regular_range(values).min()
}

/// Upper bound of [`regular_range`].
pub fn max_regular(values: &[f64]) -> f64 {
    regular_range(values).max()
}

/// Smallest observed value that lies within the regular range.
///
/// `NaN` if no value qualifies.
pub fn min_regular_value(values: &[f64]) -> f64 {
    let fence = regular_range(values);
    values
        .iter()
        .copied()
        .filter(|&v| fence.contains(v))
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// Largest observed value that lies within the regular range.
///
/// `NaN` if no value qualifies.
pub fn max_regular_value(values: &[f64]) -> f64 {
    let fence = regular_range(values);
    values
        .iter()
        .copied()
        .filter(|&v| fence.contains(v))
        .reduce(f64::max)
        .unwrap_or(f64::NAN)
}

/// Non-`NaN` values outside the regular range, in input order.
pub fn outliers(values: &[f64]) -> Vec<f64> {
    let fence = regular_range(values);
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan() && !fence.contains(*v))
        .collect()
}
