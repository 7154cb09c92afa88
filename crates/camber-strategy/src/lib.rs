//! # Camber Strategy
//!
//! Mispricing signals, delta hedging, and backtesting for the Camber
//! convertible bond analytics library.
//!
//! This crate provides:
//!
//! - **Signals**: fair-value series, rolling z-scores, and a two-state
//!   entry/exit machine over the mispricing (fair minus market)
//! - **Hedging**: [`DeltaHedger`], daily repricing that sizes an
//!   offsetting short-stock position and marks the hedged portfolio
//! - **Backtesting**: [`Backtester`], fusing the signal state with the
//!   hedge portfolio values into a daily P&L series
//!
//! All batch runs are fail-fast: a failure on any single date aborts the
//! whole run rather than skipping or substituting a value. With the
//! `parallel` feature enabled, per-date pricing calls fan out across
//! threads; results are identical because every pricing call is a pure
//! function of immutable shared inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use camber_core::prelude::*;
//! use camber_curves::FlatCurve;
//! use camber_strategy::prelude::*;
//!
//! let contract = ConvertibleContract::builder()
//!     .face_value(100.0)
//!     .coupon_rate(0.03)
//!     .maturity(3.0)
//!     .conversion_ratio(1.0)
//!     .coupon_freq(2)
//!     .build()
//!     .unwrap();
//!
//! let rates = FlatCurve::new(0.02);
//! let dividends = FlatCurve::new(0.01);
//! let spreads = FlatCurve::new(0.03);
//! let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);
//!
//! let start = Date::from_ymd(2020, 1, 1).unwrap();
//! let dates: Vec<Date> = (0..30).map(|i| start.add_days(i)).collect();
//! let stock = DailySeries::constant(dates.clone(), 100.0).unwrap();
//! let cb_market = DailySeries::constant(dates, 99.0).unwrap();
//!
//! let backtester = Backtester::new(
//!     market,
//!     ValuationSpec::new(50, 0.25),
//!     SignalConfig::new(20, -1.5, -0.5),
//!     100_000.0,
//! )
//! .unwrap();
//!
//! let result = backtester.run(&cb_market, &stock).unwrap();
//! assert_eq!(result.len(), 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::float_cmp)]

pub mod backtest;
pub mod error;
pub mod hedging;
pub mod rolling;
pub mod signals;
pub mod valuation;

pub use backtest::{backtest_records, BacktestRecord, Backtester};
pub use error::{StrategyError, StrategyResult};
pub use hedging::{DeltaHedger, HedgeState};
pub use signals::{
    add_zscore_and_signal, compute_mispricing, mispricing_records, MispricingRecord, SignalConfig,
    SignalState,
};
pub use valuation::{MarketInputs, RepriceMode, ValuationSpec};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backtest::{backtest_records, BacktestRecord, Backtester};
    pub use crate::error::{StrategyError, StrategyResult};
    pub use crate::hedging::{DeltaHedger, HedgeState};
    pub use crate::signals::{
        add_zscore_and_signal, compute_mispricing, mispricing_records, MispricingRecord,
        SignalConfig, SignalState,
    };
    pub use crate::valuation::{MarketInputs, RepriceMode, ValuationSpec};
}
