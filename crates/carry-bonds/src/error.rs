//! Error types for bond operations.

use thiserror::Error;

use carry_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond definition.
    #[error("Invalid bond definition: {reason}")]
    InvalidDefinition {
        /// Description of what's invalid.
        reason: String,
    },

    /// The bond matures before the futures delivery date.
    #[error("Bond maturity {maturity} is before delivery date {delivery}")]
    MaturityBeforeDelivery {
        /// Maturity date.
        maturity: String,
        /// Delivery date.
        delivery: String,
    },

    /// No cash flow remains after settlement.
    #[error("Bond {instrument} has no cash flows after settlement {settlement}")]
    NoCashFlows {
        /// Bond identifier.
        instrument: String,
        /// Settlement date.
        settlement: String,
    },

    /// A yield or z-spread solve did not converge.
    #[error("Solve for {instrument} failed to converge to {tolerance:.1e} after {iterations} iterations")]
    ConvergenceFailed {
        /// Bond identifier.
        instrument: String,
        /// Requested tolerance.
        tolerance: f64,
        /// Iterations attempted.
        iterations: u32,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] carry_core::CoreError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] carry_curves::CurveError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid definition error.
    #[must_use]
    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            reason: reason.into(),
        }
    }

    /// Creates a convergence failure for `instrument`.
    #[must_use]
    pub fn convergence_failed(instrument: impl Into<String>, tolerance: f64, iterations: u32) -> Self {
        Self::ConvergenceFailed {
            instrument: instrument.into(),
            tolerance,
            iterations,
        }
    }

    /// Maps a solver error into a convergence failure naming the instrument.
    ///
    /// Bracketing failures count as non-convergence with the full budget spent.
    #[must_use]
    pub fn from_solver(instrument: &str, tolerance: f64, max_iterations: u32, error: MathError) -> Self {
        match error {
            MathError::ConvergenceFailed { iterations, .. } => {
                Self::convergence_failed(instrument, tolerance, iterations)
            }
            MathError::InvalidBracket { .. } => Self::convergence_failed(instrument, tolerance, max_iterations),
            other => Self::Math(other),
        }
    }
}
