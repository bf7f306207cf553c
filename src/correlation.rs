//! Correlation analysis.
//!
//! Pearson, Spearman, and Kendall tau-b correlation coefficients.
//!
//! Pairs in which either value is `NaN` are dropped before computing. All
//! three coefficients return `NaN` when the slices differ in length or fewer
//! than 3 complete pairs remain.
//!
//! # Examples
//!
//! ```
//! use u_statfit::correlation::{pearson, spearman, kendall_tau_b};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.0, 4.0, 5.0, 4.0, 5.0];
//!
//! assert!(pearson(&x, &y) > 0.7);
//! assert!(spearman(&x, &y) > 0.7);
//! assert!(kendall_tau_b(&x, &y) > 0.5);
//!
//! // Too few observations
//! assert!(pearson(&[1.0, 2.0], &[3.0, 4.0]).is_nan());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::rank::rank;

/// Returns the complete (x, y) pairs, or `None` if the input is unusable.
fn complete_pairs(x: &[f64], y: &[f64]) -> Option<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return None;
    }
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .unzip();
    if xs.len() < 3 {
        return None;
    }
    Some((xs, ys))
}

// ---------------------------------------------------------------------------
// Pearson
// ---------------------------------------------------------------------------

/// Computes the Pearson product-moment correlation coefficient.
///
/// # Algorithm
///
/// r = Σ(xᵢ - x̄)(yᵢ - ȳ) / ((n-1) · Sx · Sy)
///
/// with Sx = √((Σx² - (Σx)²/n) / (n-1)), and likewise for Sy.
///
/// # Returns
///
/// `NaN` if the slices differ in length, fewer than 3 complete pairs
/// exist, or either variable has zero variance.
///
/// # References
///
/// Pearson (1895). "Note on regression and inheritance in the case of
/// two parents". Proceedings of the Royal Society of London, 58, 240–242.
///
/// # Examples
///
/// ```
/// use u_statfit::correlation::pearson;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((pearson(&x, &y) - 1.0).abs() < 1e-10);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let Some((x, y)) = complete_pairs(x, y) else {
        return f64::NAN;
    };
    let n = x.len() as f64;

    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let (mut sum_x, mut sum_y, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(&y) {
        numerator += (xi - mean_x) * (yi - mean_y);
        sum_x += xi;
        sum_y += yi;
        sum_x2 += xi * xi;
        sum_y2 += yi * yi;
    }

    let sx = ((sum_x2 - sum_x * sum_x / n) / (n - 1.0)).sqrt();
    let sy = ((sum_y2 - sum_y * sum_y / n) / (n - 1.0)).sqrt();

    numerator / ((n - 1.0) * sx * sy)
}

// ---------------------------------------------------------------------------
// Spearman
// ---------------------------------------------------------------------------

/// Computes the Spearman rank correlation coefficient.
///
/// # Algorithm
///
/// Ranks both variables with midranks for ties, then
///
/// ρ = 1 - 6 · Σ(Rxᵢ - Ryᵢ)² / (n · (n² - 1))
///
/// # Returns
///
/// `NaN` if the slices differ in length or fewer than 3 complete pairs exist.
///
/// # References
///
/// Spearman (1904). "The proof and measurement of association between two
/// things". The American Journal of Psychology, 15(1), 72–101.
///
/// # Examples
///
/// ```
/// use u_statfit::correlation::spearman;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.0, 8.0, 27.0, 64.0, 125.0];
/// assert!((spearman(&x, &y) - 1.0).abs() < 1e-10);
/// ```
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let Some((x, y)) = complete_pairs(x, y) else {
        return f64::NAN;
    };
    let n = x.len() as f64;

    let rx = rank(&x);
    let ry = rank(&y);

    let sum_d2: f64 = rx.iter().zip(&ry).map(|(a, b)| (a - b).powi(2)).sum();

    1.0 - 6.0 * sum_d2 / (n * (n * n - 1.0))
}

// ---------------------------------------------------------------------------
// Kendall tau-b
// ---------------------------------------------------------------------------

/// Computes Kendall's tau-b correlation coefficient with tie correction.
///
/// # Algorithm
///
/// τ_b = (C - D) / √[(n₀ - Tx)(n₀ - Ty)]
///
/// where C = concordant pairs, D = discordant pairs, n₀ = n(n-1)/2, and
/// Tx, Ty count the pairs tied in x and in y respectively. A pair tied in
/// both variables counts once in each.
///
/// # Complexity
///
/// O(n²) pairwise enumeration over the ranks.
///
/// # Returns
///
/// `NaN` if the slices differ in length, fewer than 3 complete pairs exist,
/// or every pair is tied in one of the variables.
///
/// # References
///
/// Kendall (1938). "A new measure of rank correlation".
/// Biometrika, 30(1/2), 81–93.
///
/// # Examples
///
/// ```
/// use u_statfit::correlation::kendall_tau_b;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [5.0, 4.0, 3.0, 2.0, 1.0];
/// assert!((kendall_tau_b(&x, &y) + 1.0).abs() < 1e-10);
/// ```
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> f64 {
    let Some((x, y)) = complete_pairs(x, y) else {
        return f64::NAN;
    };
    let n = x.len();

    let rx = rank(&x);
    let ry = rank(&y);

    let mut concordant: i64 = 0;
    let mut discordant: i64 = 0;
    let mut ties_x: i64 = 0;
    let mut ties_y: i64 = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let x_rel = sign(rx[j] - rx[i]);
            let y_rel = sign(ry[j] - ry[i]);
            if x_rel == 0 || y_rel == 0 {
                if x_rel == 0 {
                    ties_x += 1;
                }
                if y_rel == 0 {
                    ties_y += 1;
                }
            } else if x_rel == y_rel {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let n0 = (n * (n - 1)) as f64 / 2.0;
    let denominator = ((n0 - ties_x as f64) * (n0 - ties_y as f64)).sqrt();

    (concordant - discordant) as f64 / denominator
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Method selection
// ---------------------------------------------------------------------------

/// Correlation coefficient selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorrelationMethod {
    /// Product-moment correlation.
    #[default]
    Pearson,
    /// Rank correlation via squared rank differences.
    Spearman,
    /// Tie-corrected rank concordance (tau-b).
    Kendall,
}

impl CorrelationMethod {
    /// All methods, in declaration order.
    pub const ALL: [CorrelationMethod; 3] = [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::Kendall,
    ];

    /// Computes this coefficient for `x` and `y`.
    pub fn compute(self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
            CorrelationMethod::Kendall => kendall_tau_b(x, y),
        }
    }

    /// Lowercase name of the method.
    pub fn name(self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::Kendall => "kendall",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown correlation method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown correlation method: {0:?} (expected pearson, spearman or kendall)")]
pub struct ParseCorrelationMethodError(String);

impl FromStr for CorrelationMethod {
    type Err = ParseCorrelationMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CorrelationMethod::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseCorrelationMethodError(name.to_string()))
    }
}
