//! Piecewise-constant rate curve.

use crate::error::{CurveError, CurveResult};
use crate::traits::RateCurve;

/// A right-continuous step-function curve.
///
/// The curve holds `n + 1` rates separated by `n` strictly increasing
/// boundaries: `rates[0]` applies on `[0, boundaries[0])`, `rates[k]` on
/// `[boundaries[k-1], boundaries[k])`, and the last rate beyond the final
/// boundary.
///
/// # Example
///
/// ```rust
/// use camber_curves::{PiecewiseConstantCurve, RateCurve};
///
/// // 2% for the first year, 2.5% for the next, 3% thereafter
/// let curve = PiecewiseConstantCurve::new(vec![1.0, 2.0], vec![0.02, 0.025, 0.03]).unwrap();
///
/// assert_eq!(curve.rate(0.5), 0.02);
/// assert_eq!(curve.rate(1.0), 0.025);
/// assert_eq!(curve.rate(7.0), 0.03);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseConstantCurve {
    boundaries: Vec<f64>,
    rates: Vec<f64>,
}

impl PiecewiseConstantCurve {
    /// Creates a piecewise-constant curve.
    ///
    /// # Arguments
    ///
    /// * `boundaries` - Segment boundaries in years (strictly increasing, positive)
    /// * `rates` - One rate per segment; must hold `boundaries.len() + 1` entries
    ///
    /// # Errors
    ///
    /// Returns an error if the rate count does not match the boundary
    /// count, or boundaries are not positive and strictly increasing.
    pub fn new(boundaries: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        if rates.len() != boundaries.len() + 1 {
            return Err(CurveError::construction_failed(format!(
                "expected {} rates for {} boundaries, got {}",
                boundaries.len() + 1,
                boundaries.len(),
                rates.len()
            )));
        }
        if let Some(&first) = boundaries.first() {
            if first <= 0.0 {
                return Err(CurveError::construction_failed(format!(
                    "boundaries must be positive, got {first}"
                )));
            }
        }
        for i in 1..boundaries.len() {
            if boundaries[i] <= boundaries[i - 1] {
                return Err(CurveError::non_monotonic_tenors(
                    i,
                    boundaries[i - 1],
                    boundaries[i],
                ));
            }
        }
        Ok(Self { boundaries, rates })
    }
}

impl RateCurve for PiecewiseConstantCurve {
    fn rate(&self, t: f64) -> f64 {
        let segment = self.boundaries.iter().take_while(|&&b| b <= t).count();
        self.rates[segment]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lookup() {
        let curve =
            PiecewiseConstantCurve::new(vec![0.5, 1.0, 2.0], vec![0.01, 0.02, 0.03, 0.04]).unwrap();

        assert!((curve.rate(0.0) - 0.01).abs() < 1e-15);
        assert!((curve.rate(0.49) - 0.01).abs() < 1e-15);
        assert!((curve.rate(0.5) - 0.02).abs() < 1e-15);
        assert!((curve.rate(1.5) - 0.03).abs() < 1e-15);
        assert!((curve.rate(2.0) - 0.04).abs() < 1e-15);
        assert!((curve.rate(99.0) - 0.04).abs() < 1e-15);
    }

    #[test]
    fn test_single_segment() {
        let curve = PiecewiseConstantCurve::new(vec![], vec![0.02]).unwrap();
        assert!((curve.rate(3.0) - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_rate_count_mismatch_rejected() {
        let result = PiecewiseConstantCurve::new(vec![1.0], vec![0.02]);
        assert!(matches!(result, Err(CurveError::ConstructionFailed { .. })));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let result = PiecewiseConstantCurve::new(vec![1.0, 1.0], vec![0.01, 0.02, 0.03]);
        assert!(matches!(
            result,
            Err(CurveError::NonMonotonicTenors { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_positive_boundary_rejected() {
        let result = PiecewiseConstantCurve::new(vec![0.0, 1.0], vec![0.01, 0.02, 0.03]);
        assert!(matches!(result, Err(CurveError::ConstructionFailed { .. })));
    }
}
