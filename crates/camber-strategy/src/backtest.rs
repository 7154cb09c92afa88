//! Signal-gated backtest of the hedged convertible position.

use camber_core::types::{DailySeries, Date, TimeTable};
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::hedging::DeltaHedger;
use crate::signals::{add_zscore_and_signal, compute_mispricing, require_column, SignalConfig};
use crate::valuation::{MarketInputs, ValuationSpec};

/// One row of the backtest P&L series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRecord {
    /// Observation date.
    pub date: Date,
    /// Realized portfolio value: the hedger's raw value when in a
    /// position, zero otherwise.
    pub portfolio_value: f64,
    /// Day-over-day change in realized portfolio value.
    pub pnl: f64,
    /// Running sum of daily P&L.
    pub cum_pnl: f64,
    /// Position held after this observation: 0 or 1.
    pub position: u8,
}

/// Convertible bond arbitrage backtester.
///
/// Fuses the mispricing signal with the delta hedger's portfolio values
/// over the same pair of aligned series:
///
/// 1. Stage A/B of the signal generator produce the z-score and the
///    latched entry/exit state.
/// 2. The hedger marks the hedged portfolio on every date.
/// 3. Dates with signal 1 realize the hedger's raw value; dates with
///    signal 0 realize zero. Daily P&L is the first difference of the
///    realized value, so entering or exiting produces a one-day jump of
///    the full raw portfolio value.
///
/// The output joins all signal and P&L columns into a single
/// [`TimeTable`] keyed by date.
pub struct Backtester<'a> {
    market: MarketInputs<'a>,
    spec: ValuationSpec,
    signal_config: SignalConfig,
    initial_cb_face: f64,
}

impl<'a> Backtester<'a> {
    /// Creates a backtester.
    ///
    /// # Errors
    ///
    /// Returns `StrategyError::InvalidParameter` when
    /// `initial_cb_face <= 0`.
    pub fn new(
        market: MarketInputs<'a>,
        spec: ValuationSpec,
        signal_config: SignalConfig,
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
            signal_config,
            initial_cb_face,
        })
    }

    /// Runs the full backtest over aligned market and stock series.
    ///
    /// Returns a table with columns `cb_market`, `stock`, `cb_fair`,
    /// `mispricing`, `zscore`, `signal`, `portfolio_value`, `pnl`,
    /// `cum_pnl`, and `position`.
    ///
    /// # Errors
    ///
    /// - `StrategyError::IndexMismatch` when the series indices differ
    /// - any valuation failure on any date (the whole run aborts)
    pub fn run(
        &self,
        cb_market: &DailySeries,
        stock: &DailySeries,
    ) -> StrategyResult<TimeTable> {
        tracing::info!(
            rows = stock.len(),
            from = %stock.first_date(),
            "starting convertible arbitrage backtest"
        );

        let table = compute_mispricing(&self.market, &self.spec, cb_market, stock)?;
        let table = add_zscore_and_signal(table, &self.signal_config)?;

        let hedger = DeltaHedger::new(self.market, self.spec, self.initial_cb_face)?;
        let history = hedger.run(stock)?;

        let signal = table
            .column("signal")
            .ok_or_else(|| StrategyError::missing_column("signal"))?
            .to_vec();

        let n = signal.len();
        let mut realized = Vec::with_capacity(n);
        let mut pnl = Vec::with_capacity(n);
        let mut cum_pnl = Vec::with_capacity(n);

        let mut prev_value = 0.0;
        let mut running = 0.0;
        for (i, state) in history.iter().enumerate() {
            let value = if signal[i] == 1.0 {
                state.portfolio_value
            } else {
                0.0
            };
            let day_pnl = value - prev_value;
            running += day_pnl;

            realized.push(value);
            pnl.push(day_pnl);
            cum_pnl.push(running);
            prev_value = value;
        }

        let table = table
            .with_column("portfolio_value", realized)?
            .with_column("pnl", pnl)?
            .with_column("cum_pnl", cum_pnl)?
            .with_column("position", signal)?;

        tracing::debug!(cum_pnl = running, "backtest complete");
        Ok(table)
    }
}

/// Extracts typed P&L rows from a completed backtest table.
///
/// # Errors
///
/// Returns `StrategyError::MissingColumn` if any of the P&L columns is
/// absent.
pub fn backtest_records(table: &TimeTable) -> StrategyResult<Vec<BacktestRecord>> {
    let portfolio_value = require_column(table, "portfolio_value")?;
    let pnl = require_column(table, "pnl")?;
    let cum_pnl = require_column(table, "cum_pnl")?;
    let position = require_column(table, "position")?;

    Ok(table
        .dates()
        .iter()
        .enumerate()
        .map(|(i, &date)| BacktestRecord {
            date,
            portfolio_value: portfolio_value[i],
            pnl: pnl[i],
            cum_pnl: cum_pnl[i],
            position: position[i] as u8,
        })
        .collect())
}
