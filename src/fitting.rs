//! Regression curve fitting with chi-square model selection.
//!
//! Every fit treats the 0-based position of a value as its x coordinate and
//! returns an [`Equation`]. [`chi_square_fit`] runs all four fits and keeps
//! the one whose predictions deviate least from the data.
//!
//! # Examples
//!
//! ```
//! use u_statfit::fitting::{chi_square_fit, linear_fit};
//! use u_statfit::Equation;
//!
//! let values = [1.0, 3.0, 5.0, 7.0, 9.0]; // y = 1 + 2x
//! let line = linear_fit(&values);
//! assert_eq!(line, Equation::polynomial([1.0, 2.0]));
//!
//! let best = chi_square_fit(&values);
//! assert_eq!(best.solve(5.0).unwrap(), 11.0);
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::equation::Equation;

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// A regression model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitModel {
    /// y = a + b·x
    Linear,
    /// y = a·xᵇ
    PowerLaw,
    /// y = ln(b·x) + a
    Logarithmic,
    /// y = a·e^(b·x)
    Exponential,
}

impl FitModel {
    /// All models in evaluation order. Earlier models win ties in
    /// [`chi_square_fit`].
    pub const ALL: [FitModel; 4] = [
        FitModel::Linear,
        FitModel::PowerLaw,
        FitModel::Logarithmic,
        FitModel::Exponential,
    ];

    /// Fits this model to `values`.
    pub fn fit(self, values: &[f64]) -> Equation {
        match self {
            FitModel::Linear => linear_fit(values),
            FitModel::PowerLaw => power_law_fit(values),
            FitModel::Logarithmic => log_fit(values),
            FitModel::Exponential => exponential_fit(values),
        }
    }

    /// Human-readable model name.
    pub fn name(self) -> &'static str {
        match self {
            FitModel::Linear => "linear",
            FitModel::PowerLaw => "power law",
            FitModel::Logarithmic => "logarithmic",
            FitModel::Exponential => "exponential",
        }
    }
}

impl fmt::Display for FitModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fitted model together with its chi-square score.
#[derive(Debug, Clone, PartialEq)]
pub struct FitCandidate {
    /// Model family.
    pub model: FitModel,
    /// Fitted equation.
    pub equation: Equation,
    /// Chi-square score of `equation` against the data (lower is better).
    pub chi_square: f64,
}

// ---------------------------------------------------------------------------
// Linear
// ---------------------------------------------------------------------------

/// Ordinary least-squares line through the data, with the index as x.
///
/// Points whose value is `NaN` or exactly zero are left out of the sums.
///
/// # Algorithm
///
/// b = (mean(xy) - x̄·ȳ) / (mean(x²) - x̄²)
/// a = ȳ - b·x̄
///
/// # Returns
///
/// `Polynomial([a, b])`. Coefficients are `NaN` when fewer than two points
/// remain.
///
/// # References
///
/// Fry (2010). "Regression: Linear Models in Statistics", pp. 3–6. Springer.
pub fn linear_fit(values: &[f64]) -> Equation {
    let mut n = 0usize;
    let (mut mean_x, mut mean_y, mut mean_xy, mut mean_x2) = (0.0, 0.0, 0.0, 0.0);

    for (x, &y) in values.iter().enumerate() {
        if y.is_nan() || y == 0.0 {
            continue;
        }
        let x = x as f64;
        n += 1;
        mean_x += x;
        mean_y += y;
        mean_xy += x * y;
        mean_x2 += x * x;
    }

    let nf = n as f64;
    mean_x /= nf;
    mean_y /= nf;
    mean_xy /= nf;
    mean_x2 /= nf;

    let slope = (mean_xy - mean_x * mean_y) / (mean_x2 - mean_x * mean_x);
    let intercept = mean_y - slope * mean_x;
    trace!(n, intercept, slope, "linear fit");

    Equation::Polynomial(vec![intercept, slope])
}

// ---------------------------------------------------------------------------
// Power law
// ---------------------------------------------------------------------------

/// Power-law fit y = a·xᵇ by linear regression in log–log space.
///
/// Points with a `NaN` value are skipped, as are points where a logarithm is
/// undefined (x = 0, or y ≤ 0).
///
/// # Algorithm
///
/// b = (n·Σ ln x ln y - Σ ln x · Σ ln y) / (n·Σ (ln x)² - (Σ ln x)²)
/// a = exp((Σ ln y - b·Σ ln x) / n)
///
/// # References
///
/// Weisstein. "Least Squares Fitting--Power Law." MathWorld.
pub fn power_law_fit(values: &[f64]) -> Equation {
    let mut n = 0usize;
    let (mut sum_ln_x, mut sum_ln_x2, mut sum_ln_y, mut sum_ln_x_ln_y) = (0.0, 0.0, 0.0, 0.0);

    for (x, &y) in values.iter().enumerate() {
        if y.is_nan() || x == 0 || y <= 0.0 {
            continue;
        }
        let ln_x = (x as f64).ln();
        let ln_y = y.ln();
        n += 1;
        sum_ln_x += ln_x;
        sum_ln_y += ln_y;
        sum_ln_x2 += ln_x * ln_x;
        sum_ln_x_ln_y += ln_x * ln_y;
    }

    let nf = n as f64;
    let b = (nf * sum_ln_x_ln_y - sum_ln_x * sum_ln_y) / (nf * sum_ln_x2 - sum_ln_x * sum_ln_x);
    let a = ((sum_ln_y - b * sum_ln_x) / nf).exp();
    trace!(n, a, b, "power law fit");

    Equation::term(a, b)
}

// ---------------------------------------------------------------------------
// Exponential
// ---------------------------------------------------------------------------

/// Exponential fit y = a·e^(b·x) by regressing ln y on x.
///
/// Points whose value is `NaN`, zero, or negative are skipped.
///
/// # Algorithm
///
/// b = (Σ x ln y - Σx · Σ ln y / n) / (Σ x² - (Σx)² / n)
/// ln a = mean(ln y) - b·x̄
pub fn exponential_fit(values: &[f64]) -> Equation {
    let mut n = 0usize;
    let (mut sum_x, mut sum_x2, mut sum_ln_y, mut sum_x_ln_y) = (0.0, 0.0, 0.0, 0.0);

    for (x, &y) in values.iter().enumerate() {
        if y.is_nan() || y <= 0.0 {
            continue;
        }
        let x = x as f64;
        let ln_y = y.ln();
        n += 1;
        sum_x += x;
        sum_x2 += x * x;
        sum_ln_y += ln_y;
        sum_x_ln_y += x * ln_y;
    }

    let nf = n as f64;
    let b = (sum_x_ln_y - sum_x * sum_ln_y / nf) / (sum_x2 - sum_x * sum_x / nf);
    let a = (sum_ln_y / nf - b * sum_x / nf).exp();
    trace!(n, a, b, "exponential fit");

    Equation::exponential(a, b)
}

// ---------------------------------------------------------------------------
// Logarithmic
// ---------------------------------------------------------------------------

/// Logarithmic fit, regressing y on ln x.
///
/// Points at x = 0 and points whose value is `NaN` or zero are skipped.
///
/// # Algorithm
///
/// b = |(n·Σ y ln x - Σy · Σ ln x) / (n·Σ (ln x)² - (Σ ln x)²)|
/// a = (Σy - b·Σ ln x) / n
///
/// The slope is placed inside the logarithm, so it is taken as an absolute
/// value to keep the equation defined for positive x.
///
/// # Returns
///
/// `MultiPart([Log { a: 1, b }, Term { a, b: 0 }])`, i.e. ln(b·x) + a.
///
/// # References
///
/// Weisstein. "Least Squares Fitting--Logarithmic." MathWorld.
pub fn log_fit(values: &[f64]) -> Equation {
    let mut n = 0usize;
    let (mut sum_y, mut sum_ln_x, mut sum_ln_x2, mut sum_y_ln_x) = (0.0, 0.0, 0.0, 0.0);

    for (x, &y) in values.iter().enumerate() {
        if y.is_nan() || x == 0 || y == 0.0 {
            continue;
        }
        let ln_x = (x as f64).ln();
        n += 1;
        sum_y += y;
        sum_ln_x += ln_x;
        sum_ln_x2 += ln_x * ln_x;
        sum_y_ln_x += y * ln_x;
    }

    let nf = n as f64;
    let b = ((nf * sum_y_ln_x - sum_y * sum_ln_x) / (nf * sum_ln_x2 - sum_ln_x * sum_ln_x)).abs();
    let a = (sum_y - b * sum_ln_x) / nf;
    trace!(n, a, b, "logarithmic fit");

    Equation::multi_part([Equation::log(1.0, b), Equation::constant(a)])
}

// ---------------------------------------------------------------------------
// Chi-square model selection
// ---------------------------------------------------------------------------

/// Chi-square score of `equation` against `values`:
/// Σ (actual - expected)² / |expected|.
///
/// Indices where the equation cannot be evaluated (a domain error) are
/// skipped, as are indices where the observed or predicted value is not
/// finite. A point predicted exactly contributes zero even when the
/// prediction is zero.
///
/// # Returns
///
/// `+∞` if no index could be scored.
///
/// # References
///
/// "Chi-square Goodness of Fit Test" (1997). Yale University, Statistics 101.
pub fn chi_square(values: &[f64], equation: &Equation) -> f64 {
    let mut score = 0.0;
    let mut scored = 0usize;

    for (x, &actual) in values.iter().enumerate() {
        let expected = match equation.solve(x as f64) {
            Ok(expected) => expected,
            Err(err) => {
                debug!(x, error = %err, "skipping point outside the equation's domain");
                continue;
            }
        };
        if !actual.is_finite() || !expected.is_finite() {
            continue;
        }
        scored += 1;
        let deviation = actual - expected;
        if deviation != 0.0 {
            score += deviation * deviation / expected.abs();
        }
    }

    if scored == 0 {
        return f64::INFINITY;
    }
    score
}

fn score(model: FitModel, values: &[f64]) -> FitCandidate {
    let equation = model.fit(values);
    let chi_square = chi_square(values, &equation);
    debug!(%model, chi_square, equation = %equation, "scored candidate fit");
    FitCandidate {
        model,
        equation,
        chi_square,
    }
}

/// Fits every model in [`FitModel::ALL`] order and scores each one.
pub fn fit_candidates(values: &[f64]) -> Vec<FitCandidate> {
    FitModel::ALL
        .into_iter()
        .map(|model| score(model, values))
        .collect()
}

/// Returns the candidate with the lowest chi-square score.
///
/// Ties keep the earlier model in [`FitModel::ALL`] order; a `NaN` score
/// never wins.
pub fn best_fit(values: &[f64]) -> FitCandidate {
    let mut best = score(FitModel::ALL[0], values);
    for model in &FitModel::ALL[1..] {
        let candidate = score(*model, values);
        if is_better(candidate.chi_square, best.chi_square) {
            best = candidate;
        }
    }
    debug!(model = %best.model, chi_square = best.chi_square, "selected fit");
    best
}

/// Finds the best-fitting equation for `values` by chi-square score.
///
/// Runs the linear, power-law, logarithmic, and exponential fits in that
/// order and returns the equation with the strictly smallest score.
pub fn chi_square_fit(values: &[f64]) -> Equation {
    best_fit(values).equation
}

fn is_better(candidate: f64, incumbent: f64) -> bool {
    !candidate.is_nan() && (incumbent.is_nan() || candidate < incumbent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + b.abs())
    }

    // -----------------------------------------------------------------------
    // Individual fits
    // -----------------------------------------------------------------------

    #[test]
    fn linear_perfect_fit() {
        let values = [1.0, 3.0, 5.0, 7.0, 9.0]; // y = 1 + 2x
        assert_eq!(linear_fit(&values), Equation::polynomial([1.0, 2.0]));
    }

    #[test]
    fn linear_skips_nan_and_zero() {
        let values = [1.0, 0.0, 5.0, f64::NAN, 9.0];
        let fit = linear_fit(&values);
        assert!(close(fit.coefficient(0).unwrap(), 1.0, 1e-12));
        assert!(close(fit.coefficient(1).unwrap(), 2.0, 1e-12));
    }

    #[test]
    fn linear_negative_slope() {
        let values = [12.0, 10.0, 8.0, 6.0, 4.0];
        let fit = linear_fit(&values);
        assert!(close(fit.coefficient(0).unwrap(), 12.0, 1e-12));
        assert!(close(fit.coefficient(1).unwrap(), -2.0, 1e-12));
    }

    #[test]
    fn power_law_recovers_parameters() {
        let values: Vec<f64> = (0..12).map(|x| 3.0 * (x as f64).powf(1.5)).collect();
        match power_law_fit(&values) {
            Equation::Term { a, b } => {
                assert!(close(a, 3.0, 1e-9), "a = {a}");
                assert!(close(b, 1.5, 1e-9), "b = {b}");
            }
            other => panic!("unexpected equation {other:?}"),
        }
    }

    #[test]
    fn exponential_recovers_parameters() {
        let values: Vec<f64> = (0..10).map(|x| 2.0 * (0.3 * x as f64).exp()).collect();
        match exponential_fit(&values) {
            Equation::Exponential { a, b } => {
                assert!(close(a, 2.0, 1e-9), "a = {a}");
                assert!(close(b, 0.3, 1e-9), "b = {b}");
            }
            other => panic!("unexpected equation {other:?}"),
        }
    }

    #[test]
    fn exponential_skips_non_positive() {
        let mut values: Vec<f64> = (0..10).map(|x| 5.0 * (-0.2 * x as f64).exp()).collect();
        values[3] = 0.0;
        values[6] = f64::NAN;
        values[8] = -4.0;
        match exponential_fit(&values) {
            Equation::Exponential { a, b } => {
                assert!(close(a, 5.0, 1e-9), "a = {a}");
                assert!(close(b, -0.2, 1e-9), "b = {b}");
            }
            other => panic!("unexpected equation {other:?}"),
        }
    }

    #[test]
    fn log_fit_structure() {
        // y = 5 + 2·ln x
        let values: Vec<f64> = (0..15)
            .map(|x| if x == 0 { f64::NAN } else { 5.0 + 2.0 * (x as f64).ln() })
            .collect();
        match log_fit(&values) {
            Equation::MultiPart(parts) => {
                assert_eq!(parts.len(), 2);
                match (&parts[0], &parts[1]) {
                    (
                        Equation::Log { a: scale, b: slope },
                        Equation::Term { a: intercept, b: power },
                    ) => {
                        assert_eq!(*scale, 1.0);
                        assert_eq!(*power, 0.0);
                        assert!(close(*slope, 2.0, 1e-9), "slope = {slope}");
                        assert!(close(*intercept, 5.0, 1e-9), "intercept = {intercept}");
                    }
                    other => panic!("unexpected parts {other:?}"),
                }
            }
            other => panic!("unexpected equation {other:?}"),
        }
    }

    #[test]
    fn log_fit_slope_is_absolute() {
        // y = 20 - 3·ln x
        let values: Vec<f64> = (0..15).map(|x| 20.0 - 3.0 * (x as f64).ln()).collect();
        match log_fit(&values) {
            Equation::MultiPart(parts) => match &parts[0] {
                Equation::Log { b, .. } => assert!(close(*b, 3.0, 1e-9), "b = {b}"),
                other => panic!("unexpected part {other:?}"),
            },
            other => panic!("unexpected equation {other:?}"),
        }
    }

    #[test]
    fn fits_on_empty_input_do_not_panic() {
        for model in FitModel::ALL {
            let _ = model.fit(&[]);
        }
        assert_eq!(chi_square(&[], &Equation::constant(1.0)), f64::INFINITY);
        assert_eq!(best_fit(&[]).model, FitModel::Linear);
    }

    // -----------------------------------------------------------------------
    // Chi-square
    // -----------------------------------------------------------------------

    #[test]
    fn chi_square_exact_fit_is_zero() {
        let values = [1.0, 3.0, 5.0, 7.0];
        let line = Equation::polynomial([1.0, 2.0]);
        assert_eq!(chi_square(&values, &line), 0.0);
    }

    #[test]
    fn chi_square_known_value() {
        // expected = 2 everywhere: (1-2)²/2 + (2-2)²/2 + (4-2)²/2 = 2.5
        let values = [1.0, 2.0, 4.0];
        assert_eq!(chi_square(&values, &Equation::constant(2.0)), 2.5);
    }

    #[test]
    fn chi_square_skips_missing_values() {
        let values = [1.0, f64::NAN, 4.0];
        assert_eq!(chi_square(&values, &Equation::constant(2.0)), 2.5);
    }

    #[test]
    fn chi_square_skips_domain_errors() {
        // ln(-x) fails for every x > 0; only x = 0 (fallback) is scored
        let values = [f64::NAN, 1.0, 2.0, 3.0];
        let eq = Equation::log(1.0, -1.0);
        assert_eq!(chi_square(&values, &eq), f64::INFINITY);

        let scored = [1.0, 1.0, 2.0];
        let value = chi_square(&scored, &eq);
        assert!(value.is_finite() && value > 0.0);
    }

    #[test]
    fn chi_square_zero_prediction_mismatch_is_infinite() {
        let values = [1.0, 0.0];
        assert_eq!(chi_square(&values, &Equation::constant(0.0)), f64::INFINITY);
        assert_eq!(chi_square(&[0.0, 0.0], &Equation::constant(0.0)), 0.0);
    }

    // -----------------------------------------------------------------------
    // Model selection
    // -----------------------------------------------------------------------

    #[test]
    fn selects_linear_for_linear_data() {
        let values = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0];
        let best = best_fit(&values);
        assert_eq!(best.model, FitModel::Linear);
        assert!(best.chi_square < 1e-12);
        assert_eq!(chi_square_fit(&values), linear_fit(&values));
    }

    #[test]
    fn selects_exponential_for_exponential_data() {
        let values: Vec<f64> = (0..12).map(|x| 2.0 * (0.5 * x as f64).exp()).collect();
        let best = best_fit(&values);
        assert_eq!(best.model, FitModel::Exponential);
        assert!(matches!(chi_square_fit(&values), Equation::Exponential { .. }));
    }

    #[test]
    fn selects_power_law_for_power_data() {
        let values: Vec<f64> = (0..12).map(|x| 0.5 * (x as f64).powf(3.0)).collect();
        assert_eq!(best_fit(&values).model, FitModel::PowerLaw);
    }

    #[test]
    fn exact_zero_prediction_keeps_model_selectable() {
        // the line through the non-zero points predicts exactly 0 at x = 0
        let values = [0.0, 2.0, 4.0, 6.0, 8.0];
        let best = best_fit(&values);
        assert_eq!(best.model, FitModel::Linear);
        assert_eq!(best.equation, Equation::polynomial([0.0, 2.0]));
        assert_eq!(best.chi_square, 0.0);
        for candidate in fit_candidates(&values) {
            assert!(!candidate.chi_square.is_nan(), "{} scored NaN", candidate.model);
        }
    }

    #[test]
    fn candidates_in_evaluation_order() {
        let values = [2.0, 3.0, 5.0, 4.0, 6.0];
        let models: Vec<FitModel> = fit_candidates(&values).iter().map(|c| c.model).collect();
        assert_eq!(models, FitModel::ALL.to_vec());
    }

    #[test]
    fn ties_keep_earlier_model() {
        assert!(!is_better(1.0, 1.0));
        assert!(is_better(0.5, 1.0));
        assert!(is_better(1.0, f64::NAN));
        assert!(!is_better(f64::NAN, 1.0));
        assert!(is_better(1.0, f64::INFINITY));
    }

    #[test]
    fn model_names() {
        assert_eq!(FitModel::PowerLaw.to_string(), "power law");
        assert_eq!(FitModel::Logarithmic.name(), "logarithmic");
    }
}
