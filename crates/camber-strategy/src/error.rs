//! Error types for signal generation, hedging, and backtesting.

use camber_core::CoreError;
use camber_pricing::PricingError;
use thiserror::Error;

/// A specialized Result type for strategy operations.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Error types for strategy operations.
///
/// All variants represent configuration or precondition violations and
/// are raised eagerly; a failure during any single date's valuation
/// aborts the entire enclosing batch run.
#[derive(Error, Debug, Clone)]
pub enum StrategyError {
    /// Two input series do not share an identical ordered date index.
    #[error("Index mismatch: {reason}")]
    IndexMismatch {
        /// Description of the mismatch.
        reason: String,
    },

    /// A required table column is absent.
    #[error("Missing column: '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },

    /// A strategy input violates its precondition.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the violated precondition.
        reason: String,
    },

    /// A valuation call failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A core type operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StrategyError {
    /// Creates an index mismatch error.
    #[must_use]
    pub fn index_mismatch(reason: impl Into<String>) -> Self {
        Self::IndexMismatch {
            reason: reason.into(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
