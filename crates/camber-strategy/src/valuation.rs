//! Shared valuation inputs and daily repricing policy.

use camber_core::types::{ConvertibleContract, DailySeries, Date};
use camber_curves::RateCurve;
use camber_pricing::{ConvertiblePricer, Valuation};
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};

/// The immutable market inputs shared by every valuation call in a run.
///
/// Groups the contract with its three curve roles. All fields are
/// borrowed; the struct is freely copyable and safe to share across
/// threads because curves are pure and never mutated.
#[derive(Clone, Copy)]
pub struct MarketInputs<'a> {
    /// Convertible bond contract terms.
    pub contract: &'a ConvertibleContract,
    /// Risk-free rate curve.
    pub rate_curve: &'a dyn RateCurve,
    /// Dividend/borrow rate curve.
    pub dividend_curve: &'a dyn RateCurve,
    /// Credit spread curve.
    pub credit_curve: &'a dyn RateCurve,
}

impl<'a> MarketInputs<'a> {
    /// Creates a new set of market inputs.
    #[must_use]
    pub fn new(
        contract: &'a ConvertibleContract,
        rate_curve: &'a dyn RateCurve,
        dividend_curve: &'a dyn RateCurve,
        credit_curve: &'a dyn RateCurve,
    ) -> Self {
        Self {
            contract,
            rate_curve,
            dividend_curve,
            credit_curve,
        }
    }

    /// Creates a pricer over these inputs with the given spec.
    #[must_use]
    pub fn pricer(&self, spec: &ValuationSpec) -> ConvertiblePricer<'a> {
        ConvertiblePricer::new(
            self.contract,
            self.rate_curve,
            self.dividend_curve,
            self.credit_curve,
            spec.vol,
            spec.steps,
        )
    }
}

/// How the remaining time to maturity evolves across a daily run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepriceMode {
    /// Every date reuses the contract's full maturity and step count.
    ///
    /// This is a deliberate simplification — the bond never ages over
    /// the run — kept as the default behavior.
    #[default]
    FullMaturity,
    /// Remaining maturity decays with ACT/365F elapsed time from the
    /// first date of the series. A date at or beyond maturity fails
    /// with an invalid parameter error.
    RollDown,
}

/// Lattice and repricing configuration for a daily run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationSpec {
    /// Number of lattice time steps.
    pub steps: usize,
    /// Annualized volatility of the underlying.
    pub vol: f64,
    /// Daily repricing policy.
    pub reprice: RepriceMode,
}

impl ValuationSpec {
    /// Creates a spec with the default [`RepriceMode::FullMaturity`].
    #[must_use]
    pub fn new(steps: usize, vol: f64) -> Self {
        Self {
            steps,
            vol,
            reprice: RepriceMode::default(),
        }
    }

    /// Sets the repricing mode.
    #[must_use]
    pub fn with_reprice_mode(mut self, reprice: RepriceMode) -> Self {
        self.reprice = reprice;
        self
    }

    /// Remaining time to maturity on `date`, per the repricing mode.
    pub(crate) fn remaining_maturity(
        &self,
        contract: &ConvertibleContract,
        first_date: Date,
        date: Date,
    ) -> StrategyResult<f64> {
        match self.reprice {
            RepriceMode::FullMaturity => Ok(contract.maturity()),
            RepriceMode::RollDown => {
                let remaining = contract.maturity() - first_date.year_fraction(date);
                if remaining <= 0.0 {
                    return Err(StrategyError::invalid_parameter(format!(
                        "valuation date {date} is at or beyond maturity"
                    )));
                }
                Ok(remaining)
            }
        }
    }
}

/// Reprices the bond on every date of a stock series.
///
/// Dates are valued independently; with the `parallel` feature the calls
/// fan out across threads, which is sound because each is a pure
/// function of immutable shared inputs. Any single-date failure aborts
/// the whole batch.
pub(crate) fn value_series(
    market: &MarketInputs<'_>,
    spec: &ValuationSpec,
    stock: &DailySeries,
) -> StrategyResult<Vec<Valuation>> {
    let first_date = stock.first_date();
    let pricer = market.pricer(spec);

    let eval = |(date, spot): (Date, f64)| -> StrategyResult<Valuation> {
        let remaining = spec.remaining_maturity(market.contract, first_date, date)?;
        pricer.price_with_maturity(spot, remaining).map_err(Into::into)
    };

    let observations: Vec<(Date, f64)> = stock.iter().collect();

    #[cfg(feature = "parallel")]
    let valuations: StrategyResult<Vec<Valuation>> = {
        use rayon::prelude::*;
        observations.into_par_iter().map(eval).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let valuations: StrategyResult<Vec<Valuation>> = observations.into_iter().map(eval).collect();

    valuations
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use camber_curves::FlatCurve;

    fn contract() -> ConvertibleContract {
        ConvertibleContract::builder()
            .face_value(100.0)
            .coupon_rate(0.03)
            .maturity(3.0)
            .conversion_ratio(1.0)
            .coupon_freq(2)
            .build()
            .unwrap()
    }

    fn weekdays(start: Date, n: usize) -> Vec<Date> {
        let mut dates = Vec::with_capacity(n);
        let mut d = if start.is_weekday() {
            start
        } else {
            start.next_weekday()
        };
        for _ in 0..n {
            dates.push(d);
            d = d.next_weekday();
        }
        dates
    }

    #[test]
    fn test_full_maturity_never_decays() {
        let contract = contract();
        let spec = ValuationSpec::new(50, 0.25);
        let first = Date::from_ymd(2020, 1, 1).unwrap();
        let later = first.add_days(500);

        let remaining = spec.remaining_maturity(&contract, first, later).unwrap();
        assert_relative_eq!(remaining, 3.0, epsilon = 0.0);
    }

    #[test]
    fn test_roll_down_decays_act365() {
        let contract = contract();
        let spec = ValuationSpec::new(50, 0.25).with_reprice_mode(RepriceMode::RollDown);
        let first = Date::from_ymd(2020, 1, 1).unwrap();

        let remaining = spec
            .remaining_maturity(&contract, first, first.add_days(365))
            .unwrap();
        assert_relative_eq!(remaining, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_roll_down_past_maturity_fails() {
        let contract = contract();
        let spec = ValuationSpec::new(50, 0.25).with_reprice_mode(RepriceMode::RollDown);
        let first = Date::from_ymd(2020, 1, 1).unwrap();
        let past = first.add_days(3 * 365 + 1);

        let result = spec.remaining_maturity(&contract, first, past);
        assert!(matches!(
            result,
            Err(StrategyError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_value_series_modes_disagree_once_time_passes() {
        let contract = contract();
        let rates = FlatCurve::new(0.02);
        let dividends = FlatCurve::new(0.01);
        let spreads = FlatCurve::new(0.03);
        let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);

        let start = Date::from_ymd(2020, 1, 1).unwrap();
        let stock = DailySeries::constant(weekdays(start, 30), 100.0).unwrap();

        let full = value_series(&market, &ValuationSpec::new(50, 0.25), &stock).unwrap();
        let rolled = value_series(
            &market,
            &ValuationSpec::new(50, 0.25).with_reprice_mode(RepriceMode::RollDown),
            &stock,
        )
        .unwrap();

        // Same spot, same date on day one
        assert_relative_eq!(full[0].price, rolled[0].price, epsilon = 0.0);
        // Full-maturity repricing is flat on a flat stock path; roll-down is not
        assert_relative_eq!(full[0].price, full[29].price, epsilon = 0.0);
        assert!((rolled[29].price - full[29].price).abs() > 1e-9);
    }
}
