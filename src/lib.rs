//! # u-statfit
//!
//! Rank-based correlation, quartile fences, and regression curve fitting
//! over a small symbolic equation algebra.
//!
//! This crate is purely computational: every function takes caller-owned
//! `f64` slices and returns plain values. `NaN` marks a missing observation
//! in inputs and an invalid request in scalar outputs.
//!
//! ## Modules
//!
//! - [`rank`] — Midrank transform for tied values
//! - [`descriptive`] — NaN-omitting mean, sum, extrema, median, std dev
//! - [`quantile`] — Quartiles, the "regular range" fence, outliers
//! - [`range`] — Closed numeric interval value type
//! - [`correlation`] — Pearson, Spearman, Kendall tau-b
//! - [`equation`] — Term/exponential/log/polynomial/multi-part equations
//! - [`fitting`] — Linear, power-law, exponential, log fits and chi-square selection
//! - [`error`] — Errors raised by equation evaluation and algebra
//!
//! ## Design Philosophy
//!
//! - **Sentinels where the data is the problem**: undersized or mismatched
//!   samples yield `NaN`, not an error
//! - **Errors where the math is the problem**: evaluating a logarithm outside
//!   its domain, or integrating it, returns [`EquationError`]
//! - **Numerical base**: sums and medians delegate to `u-numflow`

pub mod correlation;
pub mod descriptive;
pub mod equation;
pub mod error;
pub mod fitting;
pub mod quantile;
pub mod range;
pub mod rank;

pub use equation::{Equation, EquationFormat};
pub use error::{EquationError, Result};
pub use range::Range;
