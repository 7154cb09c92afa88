//! Daily delta hedging simulation.

use camber_core::types::{DailySeries, Date};
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::valuation::{value_series, MarketInputs, ValuationSpec};

/// Snapshot of the hedged position on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeState {
    /// Valuation date.
    pub date: Date,
    /// Face amount of the convertible bond position.
    pub face_position: f64,
    /// Observed stock price.
    pub stock_price: f64,
    /// Mark-to-model value of the bond position.
    pub cb_price: f64,
    /// Root-level delta from the day's valuation.
    pub delta: f64,
    /// Shares shorted against the bond position.
    pub hedge_shares: f64,
    /// Mark-to-market of the hedged portfolio:
    /// `cb_price − hedge_shares · stock_price`.
    pub portfolio_value: f64,
}

/// Daily delta hedging engine.
///
/// For each date in an underlying price series the bond is repriced, a
/// short-stock hedge is sized from the day's delta, and the hedged
/// portfolio is marked. Dates are processed independently; no state is
/// carried between them beyond appending to the history.
///
/// # Example
///
/// ```rust
/// use camber_core::prelude::*;
/// use camber_curves::FlatCurve;
/// use camber_strategy::{DeltaHedger, MarketInputs, ValuationSpec};
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
/// let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);
///
/// let hedger = DeltaHedger::new(market, ValuationSpec::new(50, 0.25), 100_000.0).unwrap();
/// let shares = hedger.hedge_shares(0.5, 100.0).unwrap();
/// assert_eq!(shares, 500.0);
/// ```
pub struct DeltaHedger<'a> {
    market: MarketInputs<'a>,
    spec: ValuationSpec,
    initial_cb_face: f64,
}

impl<'a> DeltaHedger<'a> {
    /// Creates a hedger for a bond position of the given face amount.
    ///
    /// # Errors
    ///
    /// Returns `StrategyError::InvalidParameter` when
    /// `initial_cb_face <= 0`.
    pub fn new(
        market: MarketInputs<'a>,
        spec: ValuationSpec,
        initial_cb_face: f64,
    ) -> StrategyResult<Self> {
        if initial_cb_face <= 0.0 {
            return Err(StrategyError::invalid_parameter(format!(
                "initial_cb_face must be positive, got {initial_cb_face}"
            )));
        }
        Ok(Self {
            market,
            spec,
            initial_cb_face,
        })
    }

    /// Shares to short against the bond position at the given delta.
    ///
    /// `hedge_shares = initial_cb_face · delta / stock_price`. The face
    /// amount stands in for the position notional; dirty price and
    /// accrued interest are not modeled.
    ///
    /// # Errors
    ///
    /// Returns `StrategyError::InvalidParameter` when
    /// `stock_price <= 0`.
    pub fn hedge_shares(&self, delta: f64, stock_price: f64) -> StrategyResult<f64> {
        if stock_price <= 0.0 {
            return Err(StrategyError::invalid_parameter(format!(
                "stock_price must be positive, got {stock_price}"
            )));
        }
        Ok(self.initial_cb_face * delta / stock_price)
    }

    /// Runs the daily hedging simulation over a stock price series.
    ///
    /// Returns one [`HedgeState`] per input date, in index order. Any
    /// single-date failure aborts the whole run; there is no partial
    /// history.
    ///
    /// # Errors
    ///
    /// Propagates pricing failures and non-positive stock prices as
    /// invalid parameter errors.
    pub fn run(&self, stock: &DailySeries) -> StrategyResult<Vec<HedgeState>> {
        let valuations = value_series(&self.market, &self.spec, stock)?;
        let face_ratio = self.initial_cb_face / self.market.contract.face_value();

        stock
            .iter()
            .zip(valuations)
            .map(|((date, stock_price), valuation)| {
                let cb_price = valuation.price * face_ratio;
                let hedge_shares = self.hedge_shares(valuation.delta, stock_price)?;
                Ok(HedgeState {
                    date,
                    face_position: self.initial_cb_face,
                    stock_price,
                    cb_price,
                    delta: valuation.delta,
                    hedge_shares,
                    portfolio_value: cb_price - hedge_shares * stock_price,
                })
            })
            .collect()
    }
}
