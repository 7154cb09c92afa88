//! Flat (constant) rate curve.

use crate::traits::RateCurve;

/// A curve returning the same rate at every tenor.
///
/// # Example
///
/// ```rust
/// use camber_curves::{FlatCurve, RateCurve};
///
/// let curve = FlatCurve::new(0.02);
/// assert_eq!(curve.rate(0.0), 0.02);
/// assert_eq!(curve.rate(5.0), 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve {
    rate: f64,
}

impl FlatCurve {
    /// Creates a flat curve at the given annualized rate.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl RateCurve for FlatCurve {
    fn rate(&self, _t: f64) -> f64 {
        self.rate
    }
}
