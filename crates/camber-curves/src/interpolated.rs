//! Linearly interpolated rate curve.

use crate::error::{CurveError, CurveResult};
use crate::traits::RateCurve;

/// A curve constructed from discrete `(tenor, rate)` pillars with linear
/// interpolation between them and flat extrapolation beyond the ends.
///
/// # Example
///
/// ```rust
/// use camber_curves::{InterpolatedCurve, RateCurve};
///
/// let curve = InterpolatedCurve::new(
///     vec![0.5, 1.0, 2.0, 5.0],
///     vec![0.020, 0.022, 0.025, 0.030],
/// ).unwrap();
///
/// // Midpoint between the 1y and 2y pillars
/// assert!((curve.rate(1.5) - 0.0235).abs() < 1e-12);
/// // Flat beyond the last pillar
/// assert!((curve.rate(10.0) - 0.030).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve {
    tenors: Vec<f64>,
    rates: Vec<f64>,
}

impl InterpolatedCurve {
    /// Creates a new interpolated curve from pillar data.
    ///
    /// # Arguments
    ///
    /// * `tenors` - Times in years (must be strictly increasing)
    /// * `rates` - Rates at each tenor
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Tenors and rates have different lengths
    /// - Fewer than 2 pillars are provided
    /// - Tenors are not strictly increasing
    pub fn new(tenors: Vec<f64>, rates: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() != rates.len() {
            return Err(CurveError::construction_failed(format!(
                "tenors ({}) and rates ({}) must have same length",
                tenors.len(),
                rates.len()
            )));
        }
        if tenors.len() < 2 {
            return Err(CurveError::insufficient_points(2, tenors.len()));
        }
        for i in 1..tenors.len() {
            if tenors[i] <= tenors[i - 1] {
                return Err(CurveError::non_monotonic_tenors(i, tenors[i - 1], tenors[i]));
            }
        }
        Ok(Self { tenors, rates })
    }

    /// Finds the index i such that tenors[i] <= t < tenors[i+1].
    fn find_segment(&self, t: f64) -> usize {
        match self
            .tenors
            .binary_search_by(|probe| probe.partial_cmp(&t).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i.min(self.tenors.len() - 2),
            Err(i) => i.saturating_sub(1).min(self.tenors.len() - 2),
        }
    }
}

impl RateCurve for InterpolatedCurve {
    fn rate(&self, t: f64) -> f64 {
        let first = self.tenors[0];
        let last = self.tenors[self.tenors.len() - 1];

        // Flat extrapolation outside the pillar range
        if t <= first {
            return self.rates[0];
        }
        if t >= last {
            return self.rates[self.rates.len() - 1];
        }

        let i = self.find_segment(t);
        let (t0, t1) = (self.tenors[i], self.tenors[i + 1]);
        let (r0, r1) = (self.rates[i], self.rates[i + 1]);
        let w = (t - t0) / (t1 - t0);
        r0 + w * (r1 - r0)
    }
}
