//! Error types for instrument analytics.

use thiserror::Error;

use crate::measure::Measure;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised by the instrument calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The measure has no meaning for the instrument.
    #[error("{measure} is not defined for {instrument}")]
    UnsupportedMeasure {
        /// Requested measure.
        measure: Measure,
        /// Instrument identifier.
        instrument: String,
    },

    /// The market data lacks a model the measure needs.
    #[error("{measure} of {instrument} requires {model}")]
    MissingModel {
        /// Requested measure.
        measure: Measure,
        /// Missing model.
        model: String,
        /// Instrument identifier.
        instrument: String,
    },

    /// Bond valuation error.
    #[error("Bond error: {0}")]
    Bond(#[from] carry_bonds::BondError),

    /// Futures valuation error.
    #[error("Futures error: {0}")]
    Futures(#[from] carry_futures::FuturesError),

    /// Option valuation error.
    #[error("Options error: {0}")]
    Options(#[from] carry_options::OptionsError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] carry_curves::CurveError),
}

impl AnalyticsError {
    /// Creates an unsupported measure error.
    #[must_use]
    pub fn unsupported(measure: Measure, instrument: impl Into<String>) -> Self {
        Self::UnsupportedMeasure {
            measure,
            instrument: instrument.into(),
        }
    }

    /// Creates a missing model error.
    #[must_use]
    pub fn missing_model(measure: Measure, model: impl Into<String>, instrument: impl Into<String>) -> Self {
        Self::MissingModel {
            measure,
            model: model.into(),
            instrument: instrument.into(),
        }
    }
}
