//! Error types for curve construction.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Not enough data points to construct the curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Tenors are not monotonically increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// Curve construction failed.
    #[error("Curve construction failed: {reason}")]
    ConstructionFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTenors {
            index,
            prev,
            current,
        }
    }

    /// Creates a construction failure error.
    #[must_use]
    pub fn construction_failed(reason: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            reason: reason.into(),
        }
    }
}
