//! Convertible bond pricing by backward induction.
//!
//! At every lattice node the holder may keep the bond, convert to stock,
//! or exercise a put, while the issuer may call — collapsed into a
//! multi-way max per node. Credit risk enters purely as an additive
//! spread on the discount rate, not as a separate default branch.

use camber_core::types::ConvertibleContract;
use camber_curves::RateCurve;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::lattice::StockLattice;

/// The winning branch of a node's exercise decision.
///
/// The default pricing entry point reduces candidates via max and
/// discards the winner; [`ConvertiblePricer::price_with_decision`]
/// reports it for the root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseDecision {
    /// Continue holding the bond.
    Hold,
    /// Holder converts into stock.
    Convert,
    /// Issuer calls the bond.
    Call,
    /// Holder puts the bond back.
    Put,
}

/// Result of a convertible bond valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Model value of one bond.
    pub price: f64,
    /// Root-level sensitivity to the stock price, estimated by a
    /// one-step finite difference across the first lattice layer.
    pub delta: f64,
}

/// Binomial lattice pricer for convertible bonds.
///
/// Borrows an immutable contract and three curves (risk-free, dividend/
/// borrow, credit spread); each call to [`price`](Self::price) is a pure
/// function of the spot, so distinct calls are safe to run concurrently.
///
/// # Example
///
/// ```rust
/// use camber_core::prelude::*;
/// use camber_curves::FlatCurve;
/// use camber_pricing::ConvertiblePricer;
///
/// let contract = ConvertibleContract::builder()
///     .face_value(100.0)
///     .coupon_rate(0.03)
///     .maturity(3.0)
///     .conversion_ratio(1.0)
///     .coupon_freq(2)
///     .build()
///     .unwrap();
///
/// let rates = FlatCurve::new(0.02);
/// let dividends = FlatCurve::new(0.01);
/// let spreads = FlatCurve::new(0.03);
///
/// let pricer = ConvertiblePricer::new(&contract, &rates, &dividends, &spreads, 0.25, 50);
/// let valuation = pricer.price(100.0).unwrap();
/// assert!(valuation.price > 0.0);
/// ```
pub struct ConvertiblePricer<'a> {
    contract: &'a ConvertibleContract,
    rate_curve: &'a dyn RateCurve,
    dividend_curve: &'a dyn RateCurve,
    credit_curve: &'a dyn RateCurve,
    vol: f64,
    steps: usize,
}

impl<'a> ConvertiblePricer<'a> {
    /// Creates a pricer over the given contract and curves.
    #[must_use]
    pub fn new(
        contract: &'a ConvertibleContract,
        rate_curve: &'a dyn RateCurve,
        dividend_curve: &'a dyn RateCurve,
        credit_curve: &'a dyn RateCurve,
        vol: f64,
        steps: usize,
    ) -> Self {
        Self {
            contract,
            rate_curve,
            dividend_curve,
            credit_curve,
            vol,
            steps,
        }
    }

    /// Prices the bond at the given spot using the contract's full maturity.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` for non-positive spot,
    /// volatility, or step count, or when the implied risk-neutral
    /// probability falls outside (0, 1).
    pub fn price(&self, spot: f64) -> PricingResult<Valuation> {
        self.induct(spot, self.contract.maturity())
            .map(|(valuation, _)| valuation)
    }

    /// Prices the bond and reports the winning branch at the root node.
    ///
    /// Interior-node decisions remain discarded; only the root's winner
    /// is surfaced.
    ///
    /// # Errors
    ///
    /// Same conditions as [`price`](Self::price).
    pub fn price_with_decision(&self, spot: f64) -> PricingResult<(Valuation, ExerciseDecision)> {
        self.induct(spot, self.contract.maturity())
    }

    /// Prices the bond with an overridden remaining time to maturity.
    ///
    /// Used by roll-down repricing, where the time to maturity decays as
    /// the valuation date advances. The coupon schedule still counts
    /// back from maturity at the contract's coupon spacing.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` when
    /// `remaining_maturity <= 0`, plus the conditions of
    /// [`price`](Self::price).
    pub fn price_with_maturity(
        &self,
        spot: f64,
        remaining_maturity: f64,
    ) -> PricingResult<Valuation> {
        if remaining_maturity <= 0.0 {
            return Err(PricingError::invalid_parameter(format!(
                "remaining maturity must be positive, got {remaining_maturity}"
            )));
        }
        self.induct(spot, remaining_maturity)
            .map(|(valuation, _)| valuation)
    }

    /// Backward induction over the lattice.
    fn induct(&self, spot: f64, maturity: f64) -> PricingResult<(Valuation, ExerciseDecision)> {
        let lattice = StockLattice::build(
            spot,
            maturity,
            self.steps,
            self.vol,
            self.rate_curve,
            self.dividend_curve,
        )?;

        let n = lattice.steps();
        let dt = lattice.dt();
        let p = lattice.prob_up();
        let contract = self.contract;

        let coupon_by_step =
            coupon_schedule(maturity, n, contract.coupon_freq(), contract.coupon_amount());

        let mut values: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        for i in 0..=n {
            values.push(vec![0.0; i + 1]);
        }

        // Terminal layer: redemption vs conversion vs unconditional
        // call/put exercise prices.
        let redemption = contract.redemption_value();
        for j in 0..=n {
            let s = lattice.price_at(n, j);
            let mut value = redemption.max(contract.conversion_value(s));
            if let Some(call) = contract.call() {
                value = value.max(call.price);
            }
            if let Some(put) = contract.put() {
                value = value.max(put.price);
            }
            values[n][j] = value;
        }

        // Interior layers, last step down to the root.
        let mut root_decision = ExerciseDecision::Hold;
        for i in (0..n).rev() {
            let t = lattice.time_at_step(i);
            let discount = (-(self.rate_curve.rate(t) + self.credit_curve.rate(t)) * dt).exp();
            let coupon = coupon_by_step[i];

            for j in 0..=i {
                let s = lattice.price_at(i, j);
                let continuation =
                    discount * (p * values[i + 1][j] + (1.0 - p) * values[i + 1][j + 1]) + coupon;

                let call = contract
                    .call()
                    .and_then(|c| c.barrier.filter(|&b| s >= b).map(|_| c.price));
                let put = contract
                    .put()
                    .and_then(|pr| pr.barrier.filter(|&b| s <= b).map(|_| pr.price));

                let (decision, value) =
                    best_candidate(continuation, contract.conversion_value(s), call, put);
                values[i][j] = value;
                if i == 0 {
                    root_decision = decision;
                }
            }
        }

        let delta = (values[1][0] - values[1][1]) / (lattice.price_at(1, 0) - lattice.price_at(1, 1));

        Ok((
            Valuation {
                price: values[0][0],
                delta,
            },
            root_decision,
        ))
    }
}

/// Reduces the node candidates via total-order max.
///
/// Candidates are compared strictly-greater in a fixed order
/// (continuation, conversion, call, put), so the earliest candidate wins
/// a tie — an arbitrary tie-break, preserved as such.
fn best_candidate(
    continuation: f64,
    conversion: f64,
    call: Option<f64>,
    put: Option<f64>,
) -> (ExerciseDecision, f64) {
    let candidates = [
        (ExerciseDecision::Hold, Some(continuation)),
        (ExerciseDecision::Convert, Some(conversion)),
        (ExerciseDecision::Call, call),
        (ExerciseDecision::Put, put),
    ];

    let mut best = (ExerciseDecision::Hold, continuation);
    for (decision, candidate) in candidates {
        if let Some(value) = candidate {
            if value > best.1 {
                best = (decision, value);
            }
        }
    }
    best
}

/// Precomputes the coupon amount landing on each interior step.
///
/// Coupon dates count back from maturity at a spacing of
/// `1 / coupon_freq` years; each date maps to the nearest step index, an
/// exact integer schedule with no floating-point modulo comparison. Two
/// coupon dates collapsing onto one coarse step both accrue there. The
/// final coupon at maturity itself is part of the redemption value and
/// is not included here.
fn coupon_schedule(maturity: f64, steps: usize, coupon_freq: u32, amount: f64) -> Vec<f64> {
    let dt = maturity / steps as f64;
    let spacing = 1.0 / f64::from(coupon_freq);
    let count = (maturity * f64::from(coupon_freq) + 1e-9).floor() as usize;

    let mut by_step = vec![0.0; steps];
    for k in 1..=count {
        let t = maturity - k as f64 * spacing;
        if t < -1e-9 {
            break;
        }
        let idx = (t.max(0.0) / dt).round() as usize;
        if idx < steps {
            by_step[idx] += amount;
        }
    }
    by_step
}
