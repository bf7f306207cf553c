//! Text rendering for equations.
//!
//! Coefficients are printed with three significant digits in the style of
//! printf's `%#g`: trailing zeros are kept, and magnitudes outside
//! `[1e-4, 10^digits)` switch to scientific form with a signed, at least
//! two-digit exponent (`1.23e+05`).

/// Significant digits used for every coefficient.
pub const SIGNIFICANT_DIGITS: usize = 3;

/// Rendering options for [`Equation::format_with`](crate::Equation::format_with).
///
/// The only option is the exponent template: a string containing a `{}`
/// placeholder that receives the rendered exponent. A template without a
/// placeholder is emitted verbatim.
///
/// # Examples
///
/// ```
/// use u_statfit::{Equation, EquationFormat};
///
/// let eq = Equation::term(2.0, 3.0);
/// assert_eq!(eq.format_with(&EquationFormat::default()), "2.00x^3.00");
/// assert_eq!(eq.format_with(&EquationFormat::new("<sup>{}</sup>")), "2.00x<sup>3.00</sup>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquationFormat {
    /// Exponent template with a `{}` placeholder.
    pub exponent_template: String,
}

impl Default for EquationFormat {
    fn default() -> Self {
        Self::new(CARET)
    }
}

pub(crate) const CARET: &str = "^{}";
pub(crate) const CARET_PARENTHESIZED: &str = "^({})";

impl EquationFormat {
    /// Creates a format with the given exponent template.
    pub fn new(exponent_template: impl Into<String>) -> Self {
        Self {
            exponent_template: exponent_template.into(),
        }
    }

    /// `^({})`, for exponents that are themselves expressions.
    pub fn parenthesized() -> Self {
        Self::new(CARET_PARENTHESIZED)
    }
}

/// Substitutes `exponent` into the first `{}` of `template`.
pub(crate) fn apply_template(template: &str, exponent: &str) -> String {
    template.replacen("{}", exponent, 1)
}

/// Renders `value` with [`SIGNIFICANT_DIGITS`] significant digits.
pub(crate) fn coefficient(value: f64) -> String {
    significant(value, SIGNIFICANT_DIGITS)
}

/// Renders `value` with `digits` significant digits, `%g` style.
///
/// # Examples
///
/// ```
/// use u_statfit::equation::format::significant;
///
/// assert_eq!(significant(2.0, 3), "2.00");
/// assert_eq!(significant(0.5, 3), "0.500");
/// assert_eq!(significant(123456.0, 3), "1.23e+05");
/// assert_eq!(significant(0.00001234, 3), "1.23e-05");
/// ```
pub fn significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, value);
    }

    // Round first; the exponent of the rounded value decides the layout.
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..digits as i32).contains(&exponent) {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        format!("{value:.decimals$}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}
