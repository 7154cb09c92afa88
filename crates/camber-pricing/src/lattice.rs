//! CRR binomial stock price lattice.
//!
//! Provides a recombining binomial tree for the underlying stock, the
//! scaffold over which convertible bond values are backward-induced.

use camber_curves::RateCurve;

use crate::error::{PricingError, PricingResult};

/// A recombining Cox-Ross-Rubinstein binomial stock price lattice.
///
/// # Structure
///
/// At time step `i`, there are `i + 1` possible states (nodes). State
/// `j` at step `i` counts the number of down moves, so
/// `price_at(i, j) = spot * up^(i - j) * down^j` and `price_at(i, 0)` is
/// the highest node of the layer.
///
/// ```text
///                    [0,0]
///                   /     \
///              [1,0]       [1,1]
///             /     \     /     \
///         [2,0]     [2,1]      [2,2]
/// ```
///
/// The up and down factors satisfy `up * down = 1`, and a single
/// risk-neutral up probability applies to every node: the rate and
/// dividend curves are sampled at `t = 0` only, a flat-rate
/// approximation rather than a time-varying-rate tree.
#[derive(Debug, Clone)]
pub struct StockLattice {
    steps: usize,
    dt: f64,
    up: f64,
    down: f64,
    prob_up: f64,
    prices: Vec<Vec<f64>>,
}

impl StockLattice {
    /// Builds a lattice from spot, maturity, volatility, and curves.
    ///
    /// # Arguments
    ///
    /// * `spot` - Stock price at the root (must be positive)
    /// * `maturity` - Time horizon in years (must be positive)
    /// * `steps` - Number of time steps (must be positive)
    /// * `vol` - Annualized volatility (must be positive)
    /// * `rate_curve` - Risk-free rate curve, sampled at t = 0
    /// * `dividend_curve` - Dividend/borrow rate curve, sampled at t = 0
    ///
    /// # Formulas
    ///
    /// - `dt = maturity / steps`
    /// - `up = exp(vol * sqrt(dt))`, `down = 1 / up`
    /// - `prob_up = (exp((r(0) - q(0)) * dt) - down) / (up - down)`
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if any input is
    /// non-positive, or if the risk-neutral probability falls outside
    /// the open interval (0, 1) — the sign of an internally
    /// inconsistent volatility/rate/step combination.
    pub fn build(
        spot: f64,
        maturity: f64,
        steps: usize,
        vol: f64,
        rate_curve: &dyn RateCurve,
        dividend_curve: &dyn RateCurve,
    ) -> PricingResult<Self> {
        if steps == 0 {
            return Err(PricingError::invalid_parameter("steps must be positive"));
        }
        if spot <= 0.0 {
            return Err(PricingError::invalid_parameter(format!(
                "spot must be positive, got {spot}"
            )));
        }
        if maturity <= 0.0 {
            return Err(PricingError::invalid_parameter(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if vol <= 0.0 {
            return Err(PricingError::invalid_parameter(format!(
                "vol must be positive, got {vol}"
            )));
        }

        let dt = maturity / steps as f64;
        let up = (vol * dt.sqrt()).exp();
        let down = 1.0 / up;

        let r0 = rate_curve.rate(0.0);
        let q0 = dividend_curve.rate(0.0);
        let growth = ((r0 - q0) * dt).exp();
        let prob_up = (growth - down) / (up - down);

        if prob_up <= 0.0 || prob_up >= 1.0 {
            return Err(PricingError::invalid_parameter(format!(
                "risk-neutral probability {prob_up:.6} outside (0, 1)"
            )));
        }

        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(vec![spot]);
        for i in 1..=steps {
            let prev = &prices[i - 1];
            let mut layer = Vec::with_capacity(i + 1);
            layer.push(prev[0] * up);
            for j in 1..=i {
                layer.push(prev[j - 1] * down);
            }
            prices.push(layer);
        }

        Ok(Self {
            steps,
            dt,
            up,
            down,
            prob_up,
            prices,
        })
    }

    /// Returns the number of time steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the time step size in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the up-move factor.
    #[must_use]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Returns the down-move factor.
    #[must_use]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Returns the risk-neutral probability of an up move.
    #[must_use]
    pub fn prob_up(&self) -> f64 {
        self.prob_up
    }

    /// Returns the stock price at the given time step and state.
    ///
    /// # Panics
    ///
    /// Panics if `time_step > steps` or `state > time_step`.
    #[must_use]
    pub fn price_at(&self, time_step: usize, state: usize) -> f64 {
        self.prices[time_step][state]
    }

    /// Returns the number of states at the given time step.
    ///
    /// This is always `time_step + 1` for a recombining tree.
    #[must_use]
    pub fn states_at(&self, time_step: usize) -> usize {
        time_step + 1
    }

    /// Returns the time in years at the given time step.
    #[must_use]
    pub fn time_at_step(&self, time_step: usize) -> f64 {
        time_step as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use camber_curves::FlatCurve;
    use proptest::prelude::*;

    fn build_default(spot: f64, maturity: f64, steps: usize, vol: f64) -> PricingResult<StockLattice> {
        StockLattice::build(
            spot,
            maturity,
            steps,
            vol,
            &FlatCurve::new(0.02),
            &FlatCurve::new(0.01),
        )
    }

    #[test]
    fn test_basic_lattice() {
        let lattice = build_default(100.0, 1.0, 10, 0.25).unwrap();

        assert_eq!(lattice.steps(), 10);
        assert_relative_eq!(lattice.dt(), 0.1, epsilon = 1e-15);
        assert_relative_eq!(lattice.price_at(0, 0), 100.0, epsilon = 0.0);
        assert!(lattice.up() > 1.0);
        assert!(lattice.down() < 1.0);
        assert!(lattice.prob_up() > 0.0 && lattice.prob_up() < 1.0);
        assert_relative_eq!(lattice.up() * lattice.down(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_layer_shape_and_ordering() {
        let lattice = build_default(100.0, 2.0, 5, 0.3).unwrap();

        for i in 0..=5 {
            assert_eq!(lattice.states_at(i), i + 1);
            // Highest state first, strictly decreasing down the layer
            for j in 1..=i {
                assert!(lattice.price_at(i, j) < lattice.price_at(i, j - 1));
            }
        }
    }

    #[test]
    fn test_recombination() {
        let lattice = build_default(100.0, 1.0, 4, 0.2).unwrap();

        // An up move followed by a down move recombines to the spot
        assert_relative_eq!(lattice.price_at(2, 1), 100.0, epsilon = 1e-10);
        // price_at(i, j) = spot * up^(i-j) * down^j
        let expected = 100.0 * lattice.up().powi(3) * lattice.down();
        assert_relative_eq!(lattice.price_at(4, 1), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = build_default(100.0, 1.0, 0, 0.25);
        assert!(matches!(result, Err(PricingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert!(build_default(0.0, 1.0, 10, 0.25).is_err());
        assert!(build_default(100.0, 0.0, 10, 0.25).is_err());
        assert!(build_default(100.0, 1.0, 10, 0.0).is_err());
    }

    #[test]
    fn test_inconsistent_probability_rejected() {
        // Tiny volatility with a large rate gap pushes p out of (0, 1)
        let result = StockLattice::build(
            100.0,
            1.0,
            2,
            0.001,
            &FlatCurve::new(0.20),
            &FlatCurve::new(0.0),
        );
        assert!(matches!(result, Err(PricingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_time_at_step() {
        let lattice = build_default(100.0, 2.5, 10, 0.25).unwrap();
        assert_relative_eq!(lattice.time_at_step(0), 0.0, epsilon = 1e-15);
        assert_relative_eq!(lattice.time_at_step(4), 1.0, epsilon = 1e-15);
        assert_relative_eq!(lattice.time_at_step(10), 2.5, epsilon = 1e-15);
    }

    proptest! {
        #[test]
        fn prop_up_down_product_is_one(
            steps in 1usize..200,
            vol in 0.05f64..0.8,
            maturity in 0.1f64..10.0,
        ) {
            if let Ok(lattice) = build_default(100.0, maturity, steps, vol) {
                prop_assert!((lattice.up() * lattice.down() - 1.0).abs() < 1e-10);
                prop_assert!(lattice.prob_up() > 0.0 && lattice.prob_up() < 1.0);
                prop_assert_eq!(lattice.price_at(0, 0), 100.0);
            }
        }
    }
}
