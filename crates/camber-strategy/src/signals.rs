//! Mispricing z-scores and the entry/exit signal machine.
//!
//! Signal generation runs in two decoupled stages:
//!
//! 1. [`compute_mispricing`] reprices the bond on every date and emits
//!    the fair-value and mispricing columns.
//! 2. [`add_zscore_and_signal`] standardizes the mispricing into a
//!    rolling z-score and drives the [`SignalState`] machine.
//!
//! The stages only communicate through the [`TimeTable`], so stage two
//! can be tested (or re-run with different thresholds) without repricing.

use camber_core::types::{DailySeries, Date, TimeTable};
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::rolling::{rolling_mean, rolling_std};
use crate::valuation::{value_series, MarketInputs, ValuationSpec};

/// Thresholds for the mispricing signal.
///
/// `entry_z < exit_z` is the expected configuration but is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Rolling window length for the z-score statistics.
    pub lookback: usize,
    /// Enter when the z-score drops below this level.
    pub entry_z: f64,
    /// Exit when the z-score rises above this level.
    pub exit_z: f64,
}

impl SignalConfig {
    /// Creates a signal configuration.
    #[must_use]
    pub fn new(lookback: usize, entry_z: f64, exit_z: f64) -> Self {
        Self {
            lookback,
            entry_z,
            exit_z,
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self::new(60, -1.5, -0.5)
    }
}

/// The two-state entry/exit machine driven by the z-score.
///
/// `Flat` transitions to `Engaged` when the z-score drops below
/// `entry_z`; `Engaged` transitions back to `Flat` when it rises above
/// `exit_z`; otherwise the state holds. NaN z-scores (warmup rows)
/// compare false against both thresholds, so the state holds through
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalState {
    /// No position held.
    #[default]
    Flat,
    /// Market-neutral position held (long CB, short stock).
    Engaged,
}

impl SignalState {
    /// Applies one z-score observation and returns the next state.
    #[must_use]
    pub fn next(self, zscore: f64, config: &SignalConfig) -> Self {
        match self {
            SignalState::Flat if zscore < config.entry_z => SignalState::Engaged,
            SignalState::Engaged if zscore > config.exit_z => SignalState::Flat,
            state => state,
        }
    }

    /// The position encoding of the state: 0 flat, 1 engaged.
    #[must_use]
    pub fn position(self) -> f64 {
        match self {
            SignalState::Flat => 0.0,
            SignalState::Engaged => 1.0,
        }
    }
}

/// One fully populated row of the signal table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MispricingRecord {
    /// Observation date.
    pub date: Date,
    /// Observed convertible bond market price.
    pub cb_market: f64,
    /// Observed stock price.
    pub stock: f64,
    /// Model fair value of the bond.
    pub cb_fair: f64,
    /// Fair value minus market price.
    pub mispricing: f64,
    /// Mispricing standardized by its rolling statistics.
    pub zscore: f64,
    /// Signal state after this observation: 0 or 1.
    pub signal: u8,
}

/// Stage A: builds the fair-value and mispricing columns.
///
/// Reprices the bond at each date's spot — by default with the full
/// original maturity on every date — and emits a table with columns
/// `cb_market`, `stock`, `cb_fair`, and `mispricing = cb_fair − cb_market`
/// over the shared date index.
///
/// # Errors
///
/// - `StrategyError::IndexMismatch` when the two series do not share an
///   identical ordered date index
/// - any pricing failure on any date (the whole run aborts)
pub fn compute_mispricing(
    market: &MarketInputs<'_>,
    spec: &ValuationSpec,
    cb_market: &DailySeries,
    stock: &DailySeries,
) -> StrategyResult<TimeTable> {
    if !cb_market.index_eq(stock) {
        return Err(StrategyError::index_mismatch(
            "cb market and stock series must share an identical date index",
        ));
    }

    let valuations = value_series(market, spec, stock)?;
    let cb_fair: Vec<f64> = valuations.iter().map(|v| v.price).collect();
    let mispricing: Vec<f64> = cb_fair
        .iter()
        .zip(cb_market.values())
        .map(|(fair, observed)| fair - observed)
        .collect();

    let table = TimeTable::with_index_of(stock)
        .with_column("cb_market", cb_market.values().to_vec())?
        .with_column("stock", stock.values().to_vec())?
        .with_column("cb_fair", cb_fair)?
        .with_column("mispricing", mispricing)?;
    Ok(table)
}

/// Stage B: appends rolling z-score and signal columns.
///
/// The z-score standardizes the mispricing by its rolling mean and
/// sample standard deviation over `lookback` observations with a
/// minimum period of `lookback / 2` (integer division). The signal
/// column records the [`SignalState`] position after each observation.
///
/// # Errors
///
/// Returns `StrategyError::MissingColumn` when the table has no
/// `mispricing` column.
pub fn add_zscore_and_signal(
    table: TimeTable,
    config: &SignalConfig,
) -> StrategyResult<TimeTable> {
    let mispricing = table
        .column("mispricing")
        .ok_or_else(|| StrategyError::missing_column("mispricing"))?
        .to_vec();

    let min_periods = config.lookback / 2;
    let means = rolling_mean(&mispricing, config.lookback, min_periods);
    let stds = rolling_std(&mispricing, config.lookback, min_periods);

    let zscore: Vec<f64> = mispricing
        .iter()
        .zip(means.iter().zip(&stds))
        .map(|(x, (m, s))| (x - m) / s)
        .collect();

    let mut state = SignalState::default();
    let signal: Vec<f64> = zscore
        .iter()
        .map(|&z| {
            state = state.next(z, config);
            state.position()
        })
        .collect();

    let table = table
        .with_column("zscore", zscore)?
        .with_column("signal", signal)?;
    Ok(table)
}

/// Extracts typed rows from a completed signal table.
///
/// # Errors
///
/// Returns `StrategyError::MissingColumn` if any of the six signal
/// columns is absent.
pub fn mispricing_records(table: &TimeTable) -> StrategyResult<Vec<MispricingRecord>> {
    let cb_market = require_column(table, "cb_market")?;
    let stock = require_column(table, "stock")?;
    let cb_fair = require_column(table, "cb_fair")?;
    let mispricing = require_column(table, "mispricing")?;
    let zscore = require_column(table, "zscore")?;
    let signal = require_column(table, "signal")?;

    Ok(table
        .dates()
        .iter()
        .enumerate()
        .map(|(i, &date)| MispricingRecord {
            date,
            cb_market: cb_market[i],
            stock: stock[i],
            cb_fair: cb_fair[i],
            mispricing: mispricing[i],
            zscore: zscore[i],
            signal: signal[i] as u8,
        })
        .collect())
}

pub(crate) fn require_column<'t>(table: &'t TimeTable, name: &str) -> StrategyResult<&'t [f64]> {
    table
        .column(name)
        .ok_or_else(|| StrategyError::missing_column(name))
}
