//! Error types for option pricing.

use thiserror::Error;

/// A specialized Result type for option operations.
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Errors raised by option securities, volatility models and pricing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// The provider carries no volatility model.
    #[error("No volatility model available to price {instrument}")]
    MissingVolatility {
        /// Instrument identifier.
        instrument: String,
    },

    /// The volatility model cannot price this underlying.
    #[error("Model {model} does not support {instrument}")]
    UnsupportedModel {
        /// Model name.
        model: String,
        /// Instrument identifier.
        instrument: String,
    },

    /// Invalid option terms or model parameters.
    #[error("Invalid option: {reason}")]
    InvalidOption {
        /// Description of the problem.
        reason: String,
    },

    /// Futures error.
    #[error("Futures error: {0}")]
    Futures(#[from] carry_futures::FuturesError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] carry_curves::CurveError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] carry_math::MathError),
}

impl OptionsError {
    /// Creates an invalid option error.
    #[must_use]
    pub fn invalid_option(reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported model error.
    #[must_use]
    pub fn unsupported_model(model: impl Into<String>, instrument: impl Into<String>) -> Self {
        Self::UnsupportedModel {
            model: model.into(),
            instrument: instrument.into(),
        }
    }
}
