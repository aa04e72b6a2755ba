//! Error types for futures pricing.

use thiserror::Error;

/// A specialized Result type for futures operations.
pub type FuturesResult<T> = Result<T, FuturesError>;

/// Errors raised by futures securities and pricing methods.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuturesError {
    /// The delivery basket has no bonds.
    #[error("Delivery basket of {contract} is empty")]
    EmptyBasket {
        /// Contract identifier.
        contract: String,
    },

    /// A conversion factor is not finite and strictly positive.
    #[error("Invalid conversion factor {value} for basket bond {index}")]
    InvalidConversionFactor {
        /// Basket index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// A model or method parameter is out of range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Two inputs that must have the same length do not.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Invalid contract dates or terms.
    #[error("Invalid contract: {reason}")]
    InvalidContract {
        /// Description of the problem.
        reason: String,
    },

    /// Bond error.
    #[error("Bond error: {0}")]
    Bond(#[from] carry_bonds::BondError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] carry_curves::CurveError),

    /// Date error.
    #[error("Core error: {0}")]
    Core(#[from] carry_core::CoreError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] carry_math::MathError),
}

impl FuturesError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid contract error.
    #[must_use]
    pub fn invalid_contract(reason: impl Into<String>) -> Self {
        Self::InvalidContract {
            reason: reason.into(),
        }
    }
}
