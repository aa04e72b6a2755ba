//! Error types for core date and convention handling.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by date, schedule and convention code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Schedule generation failed.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the failure.
        reason: String,
    },

    /// A convention was used outside its domain.
    #[error("Invalid convention {convention}: {reason}")]
    InvalidConvention {
        /// Name of the convention.
        convention: String,
        /// Why it cannot be applied.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid convention error.
    #[must_use]
    pub fn invalid_convention(convention: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConvention {
            convention: convention.into(),
            reason: reason.into(),
        }
    }
}
