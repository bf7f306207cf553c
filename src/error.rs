//! Errors raised by the equation algebra.
//!
//! Sample-level problems (too few points, mismatched lengths, empty input)
//! are reported as `NaN` by the statistics functions and never reach this
//! type.

/// Error raised while evaluating or transforming an [`Equation`](crate::Equation).
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum EquationError {
    /// The equation was evaluated outside its real domain.
    #[error("unable to take the logarithm of a negative number (b*x = {argument})")]
    Domain {
        /// The offending argument, e.g. `b·x` for a log equation.
        argument: f64,
    },

    /// The requested operation has no closed form for this equation kind.
    #[error("{operation} of a {equation} equation is not supported")]
    Unsupported {
        /// Operation name, e.g. `"integral"`.
        operation: &'static str,
        /// Equation kind, e.g. `"log"`.
        equation: &'static str,
    },
}

/// Result type for equation operations.
pub type Result<T> = std::result::Result<T, EquationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_message_includes_argument() {
        let err = EquationError::Domain { argument: -2.5 };
        assert_eq!(
            err.to_string(),
            "unable to take the logarithm of a negative number (b*x = -2.5)"
        );
    }

    #[test]
    fn unsupported_message() {
        let err = EquationError::Unsupported {
            operation: "integral",
            equation: "log",
        };
        assert_eq!(err.to_string(), "integral of a log equation is not supported");
    }
}
