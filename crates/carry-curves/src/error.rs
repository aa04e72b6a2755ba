//! Error types for curve operations.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors raised by curves and curve providers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No curve is registered under the requested key.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// Key that failed to resolve (currency, index, issuer or curve name).
        name: String,
    },

    /// Curve data is invalid.
    #[error("Invalid curve {name}: {reason}")]
    InvalidCurve {
        /// Curve name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Parameter index is outside the curve's parameter range.
    #[error("Parameter {index} out of range for curve {name} with {count} parameters")]
    ParameterOutOfRange {
        /// Curve name.
        name: String,
        /// Requested index.
        index: usize,
        /// Number of parameters.
        count: usize,
    },

    /// Sizes of a sensitivity and a Jacobian do not match.
    #[error("Dimension mismatch for curve {name}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Curve name.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// Underlying numerical error.
    #[error("Math error: {0}")]
    Math(#[from] carry_math::MathError),
}

impl CurveError {
    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(name: impl Into<String>) -> Self {
        Self::CurveNotFound { name: name.into() }
    }

    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
