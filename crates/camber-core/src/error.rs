//! Error types for the Camber core library.
//!
//! This module defines the error types used by the foundational types,
//! providing structured error handling with context.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid contract specification.
    #[error("Invalid contract specification: {reason}")]
    InvalidContract {
        /// Description of what's invalid.
        reason: String,
    },

    /// Malformed series or table construction.
    #[error("Invalid series: {reason}")]
    InvalidSeries {
        /// Description of the series error.
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

    /// Creates an invalid contract error.
    #[must_use]
    pub fn invalid_contract(reason: impl Into<String>) -> Self {
        Self::InvalidContract {
            reason: reason.into(),
        }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }
}
