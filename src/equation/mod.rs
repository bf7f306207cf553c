//! Equation algebra.
//!
//! A closed set of single-variable equations supporting evaluation,
//! symbolic differentiation, symbolic integration, and text formatting.
//! Every operation returns a new value; equations are never mutated.
//!
//! | Variant | Value |
//! |---|---|
//! | [`Equation::Term`] | a·xᵇ |
//! | [`Equation::Exponential`] | a·e^(b·x) |
//! | [`Equation::Log`] | a·ln(b·x) |
//! | [`Equation::Polynomial`] | Σ cᵢ·xⁱ |
//! | [`Equation::MultiPart`] | Σ of parts |
//!
//! # Examples
//!
//! ```
//! use u_statfit::Equation;
//!
//! let eq = Equation::polynomial([1.0, 2.0, 3.0]); // 1 + 2x + 3x²
//! assert_eq!(eq.solve(2.0).unwrap(), 17.0);
//!
//! let slope = eq.derivative(); // 2 + 6x
//! assert_eq!(slope.solve(2.0).unwrap(), 14.0);
//!
//! let area = eq.integral(0.0).unwrap(); // x + x² + x³
//! assert_eq!(area.solve(1.0).unwrap(), 3.0);
//!
//! assert_eq!(eq.to_string(), "3.00x^2 + 2.00x + 1.00");
//! ```

pub mod format;

use std::fmt;

use crate::error::{EquationError, Result};

pub use self::format::EquationFormat;
use self::format::{apply_template, coefficient, CARET, CARET_PARENTHESIZED};

/// A single-variable equation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Equation {
    /// a·xᵇ
    Term {
        /// Multiplier.
        a: f64,
        /// Power.
        b: f64,
    },
    /// a·e^(b·x)
    Exponential {
        /// Multiplier.
        a: f64,
        /// Multiplier of x in the exponent.
        b: f64,
    },
    /// a·ln(b·x)
    Log {
        /// Multiplier.
        a: f64,
        /// Multiplier of x inside the logarithm.
        b: f64,
    },
    /// Σ cᵢ·xⁱ, coefficients ordered from the constant term upward.
    Polynomial(Vec<f64>),
    /// Sum of sub-equations.
    MultiPart(Vec<Equation>),
}

impl Equation {
    /// a·xᵇ.
    pub fn term(a: f64, b: f64) -> Self {
        Equation::Term { a, b }
    }

    /// The constant `c`, as the term c·x⁰.
    pub fn constant(c: f64) -> Self {
        Equation::Term { a: c, b: 0.0 }
    }

    /// a·e^(b·x).
    pub fn exponential(a: f64, b: f64) -> Self {
        Equation::Exponential { a, b }
    }

    /// a·ln(b·x).
    pub fn log(a: f64, b: f64) -> Self {
        Equation::Log { a, b }
    }

    /// Polynomial with coefficients ordered from the constant term upward.
    pub fn polynomial(coefficients: impl Into<Vec<f64>>) -> Self {
        Equation::Polynomial(coefficients.into())
    }

    /// Sum of `parts`.
    pub fn multi_part(parts: impl IntoIterator<Item = Equation>) -> Self {
        Equation::MultiPart(parts.into_iter().collect())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Equation::Term { .. } => "term",
            Equation::Exponential { .. } => "exponential",
            Equation::Log { .. } => "log",
            Equation::Polynomial(_) => "polynomial",
            Equation::MultiPart(_) => "multi-part",
        }
    }

    /// Degree of a polynomial (`None` for other variants or an empty
    /// coefficient list).
    pub fn degree(&self) -> Option<usize> {
        match self {
            Equation::Polynomial(c) => c.len().checked_sub(1),
            _ => None,
        }
    }

    /// Coefficient of xᵖᵒʷᵉʳ in a polynomial.
    pub fn coefficient(&self, power: usize) -> Option<f64> {
        match self {
            Equation::Polynomial(c) => c.get(power).copied(),
            _ => None,
        }
    }

    /// Evaluates the equation at `x`.
    ///
    /// # Errors
    ///
    /// [`EquationError::Domain`] when a log equation (or a multi-part
    /// equation containing one) is evaluated where b·x < 0. Where b·x == 0
    /// the log evaluates to `a·ln(m)` with `m` the smallest positive `f64`,
    /// a large but finite value.
    pub fn solve(&self, x: f64) -> Result<f64> {
        match self {
            Equation::Term { a, b } => Ok(a * x.powf(*b)),
            Equation::Exponential { a, b } => Ok(a * (b * x).exp()),
            Equation::Log { a, b } => {
                let argument = b * x;
                if argument < 0.0 {
                    Err(EquationError::Domain { argument })
                } else if argument == 0.0 {
                    Ok(a * MIN_POSITIVE_SUBNORMAL.ln())
                } else {
                    Ok(a * argument.ln())
                }
            }
            Equation::Polynomial(c) => Ok(c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)),
            Equation::MultiPart(parts) => parts
                .iter()
                .try_fold(0.0, |acc, part| Ok(acc + part.solve(x)?)),
        }
    }

    /// Returns the first derivative.
    ///
    /// A constant term (b = 0) differentiates to the zero constant
    /// `Term { a: 0, b: 0 }` rather than `Term { a: 0, b: -1 }`, so the
    /// result evaluates to 0 at x = 0 and formats as `0.00`.
    ///
    /// ```
    /// use u_statfit::Equation;
    ///
    /// assert_eq!(Equation::constant(5.0).derivative(), Equation::term(0.0, 0.0));
    /// assert_eq!(Equation::term(3.0, 2.0).derivative(), Equation::term(6.0, 1.0));
    /// ```
    pub fn derivative(&self) -> Equation {
        match self {
            // d/dx of a constant is the zero constant, not 0·x⁻¹
            Equation::Term { b, .. } if *b == 0.0 => Equation::constant(0.0),
            Equation::Term { a, b } => Equation::term(a * b, b - 1.0),
            Equation::Exponential { a, b } => Equation::exponential(a * b, *b),
            Equation::Log { a, .. } => Equation::term(*a, -1.0),
            Equation::Polynomial(c) => Equation::Polynomial(
                c.iter()
                    .enumerate()
                    .skip(1)
                    .map(|(power, ci)| ci * power as f64)
                    .collect(),
            ),
            Equation::MultiPart(parts) => {
                Equation::MultiPart(parts.iter().map(Equation::derivative).collect())
            }
        }
    }

    /// Returns the antiderivative with integration constant `constant`.
    ///
    /// - Term: a/(b+1)·xᵇ⁺¹, or a·ln(x) for b = −1; the constant is added
    ///   as a separate part only when non-zero.
    /// - Exponential: (a/b)·e^(b·x) plus the constant part (a·x for b = 0).
    /// - Polynomial: the constant becomes the new x⁰ coefficient.
    /// - Multi-part: each part integrated with a zero constant, then a
    ///   single constant part appended when non-zero.
    ///
    /// # Errors
    ///
    /// [`EquationError::Unsupported`] for log equations, directly or as a
    /// part of a multi-part equation.
    pub fn integral(&self, constant: f64) -> Result<Equation> {
        match self {
            Equation::Term { a, b } => {
                let antiderivative = if *b == -1.0 {
                    Equation::log(*a, 1.0)
                } else {
                    Equation::term(a / (b + 1.0), b + 1.0)
                };
                Ok(with_constant(antiderivative, constant))
            }
            Equation::Exponential { a, b } => {
                let antiderivative = if *b == 0.0 {
                    Equation::term(*a, 1.0)
                } else {
                    Equation::exponential(a / b, *b)
                };
                Ok(Equation::MultiPart(vec![
                    antiderivative,
                    Equation::constant(constant),
                ]))
            }
            Equation::Log { .. } => Err(EquationError::Unsupported {
                operation: "integral",
                equation: self.kind(),
            }),
            Equation::Polynomial(c) => Ok(Equation::Polynomial(
                std::iter::once(constant)
                    .chain(
                        c.iter()
                            .enumerate()
                            .map(|(power, ci)| ci / (power + 1) as f64),
                    )
                    .collect(),
            )),
            Equation::MultiPart(parts) => {
                let mut integrated = parts
                    .iter()
                    .map(|part| part.integral(0.0))
                    .collect::<Result<Vec<_>>>()?;
                if constant != 0.0 {
                    integrated.push(Equation::constant(constant));
                }
                Ok(Equation::MultiPart(integrated))
            }
        }
    }

    /// Renders the equation, passing exponents through `exponent_template`.
    ///
    /// The template's `{}` placeholder receives the rendered exponent, e.g.
    /// `"^{}"` or `"<sup>{}</sup>"`. Coefficients use three significant
    /// digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_statfit::Equation;
    ///
    /// assert_eq!(Equation::term(1.5, 2.0).format("^{}"), "1.50x^2.00");
    /// assert_eq!(Equation::exponential(2.0, 0.5).format("^({})"), "2.00e^(0.500x)");
    /// assert_eq!(Equation::log(1.0, 3.0).format("^{}"), "1.00 * ln( 3.00x )");
    /// ```
    pub fn format(&self, exponent_template: &str) -> String {
        match self {
            Equation::Term { a, b } => {
                if *b == 0.0 {
                    coefficient(*a)
                } else if *b == 1.0 {
                    format!("{}x", coefficient(*a))
                } else {
                    format!(
                        "{}x{}",
                        coefficient(*a),
                        apply_template(exponent_template, &coefficient(*b))
                    )
                }
            }
            Equation::Exponential { a, b } => format!(
                "{}e{}",
                coefficient(*a),
                apply_template(exponent_template, &format!("{}x", coefficient(*b)))
            ),
            Equation::Log { a, b } => {
                format!("{} * ln( {}x )", coefficient(*a), coefficient(*b))
            }
            Equation::Polynomial(c) => format_polynomial(c, exponent_template),
            Equation::MultiPart(parts) => parts
                .iter()
                .map(|part| part.format(exponent_template))
                .collect::<Vec<_>>()
                .join(" + "),
        }
    }

    /// Renders the equation with the options in `format`.
    pub fn format_with(&self, format: &EquationFormat) -> String {
        self.format(&format.exponent_template)
    }
}

/// Smallest positive subnormal `f64` (2⁻¹⁰⁷⁴).
const MIN_POSITIVE_SUBNORMAL: f64 = 4.9406564584124654e-324;

fn with_constant(equation: Equation, constant: f64) -> Equation {
    if constant == 0.0 {
        equation
    } else {
        Equation::MultiPart(vec![equation, Equation::constant(constant)])
    }
}

fn format_polynomial(coefficients: &[f64], exponent_template: &str) -> String {
    if coefficients.is_empty() {
        return coefficient(0.0);
    }
    let mut out = String::new();
    for (power, &c) in coefficients.iter().enumerate().rev() {
        if out.is_empty() {
            out.push_str(&coefficient(c));
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
            out.push_str(&coefficient(c.abs()));
        }
        if power > 0 {
            out.push('x');
        }
        if power > 1 {
            out.push_str(&apply_template(exponent_template, &power.to_string()));
        }
    }
    out
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let template = match self {
            Equation::Exponential { .. } => CARET_PARENTHESIZED,
            _ => CARET,
        };
        f.write_str(&self.format(template))
    }
}
