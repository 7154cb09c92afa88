//! Error types for lattice construction and pricing.

use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Error types for pricing operations.
///
/// All pricing failures are configuration or precondition violations,
/// raised eagerly at the point of detection. Nothing is retried or
/// substituted; a failed valuation aborts the enclosing batch.
#[derive(Error, Debug, Clone)]
pub enum PricingError {
    /// A valuation input violates its precondition.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the violated precondition.
        reason: String,
    },
}

impl PricingError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PricingError::invalid_parameter("steps must be positive");
        assert!(err.to_string().contains("Invalid parameter"));
        assert!(err.to_string().contains("steps"));
    }
}
