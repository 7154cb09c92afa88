//! End-to-end backtest over a simulated market.
//!
//! Drives the full pipeline — pricing, signals, hedging, P&L assembly —
//! over a deterministic seeded GBM stock path and a noisy synthetic
//! convertible market price, the way a production run would consume
//! real observations.

use camber_core::prelude::*;
use camber_curves::FlatCurve;
use camber_strategy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const VOL: f64 = 0.25;
const STEPS: usize = 50;

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

fn simulate_gbm_path(s0: f64, r: f64, q: f64, vol: f64, dates: &[Date], seed: u64) -> DailySeries {
    let dt: f64 = 1.0 / 252.0;
    let mut rng = StdRng::seed_from_u64(seed);
    let shocks = Normal::new(0.0, dt.sqrt()).unwrap();

    let mut prices = Vec::with_capacity(dates.len());
    let mut s = s0;
    prices.push(s);
    for _ in 1..dates.len() {
        let eps = shocks.sample(&mut rng);
        s *= ((r - q - 0.5 * vol * vol) * dt + vol * eps).exp();
        prices.push(s);
    }
    DailySeries::new(dates.to_vec(), prices).unwrap()
}

/// A noisy observable CB price: a decaying bond floor plus a fraction of
/// conversion value, with 2% multiplicative noise.
fn synthetic_cb_market(stock: &DailySeries, face: f64, conversion_ratio: f64, seed: u64) -> DailySeries {
    let n = stock.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();

    let values: Vec<f64> = stock
        .values()
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let years = i as f64 / (n - 1) as f64;
            let bond_floor = face * (-0.01 * years).exp();
            let theoretical = bond_floor + 0.4 * conversion_ratio * s;
            theoretical * (1.0 + 0.02 * noise.sample(&mut rng))
        })
        .collect();
    DailySeries::new(stock.dates().to_vec(), values).unwrap()
}

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

#[test]
fn backtest_100_business_days() {
    let contract = contract();
    let rates = FlatCurve::new(0.02);
    let dividends = FlatCurve::new(0.01);
    let spreads = FlatCurve::new(0.03);
    let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);

    let dates = weekdays(Date::from_ymd(2020, 1, 1).unwrap(), 100);
    let stock = simulate_gbm_path(100.0, 0.02, 0.01, VOL, &dates, 42);
    let cb_market = synthetic_cb_market(&stock, 100.0, 1.0, 123);

    let backtester = Backtester::new(
        market,
        ValuationSpec::new(STEPS, VOL),
        SignalConfig::new(40, -1.5, -0.5),
        100_000.0,
    )
    .unwrap();

    let result = backtester.run(&cb_market, &stock).unwrap();

    assert_eq!(result.len(), 100);
    for column in [
        "cb_market",
        "stock",
        "cb_fair",
        "mispricing",
        "zscore",
        "signal",
        "portfolio_value",
        "pnl",
        "cum_pnl",
        "position",
    ] {
        assert!(result.has_column(column), "missing column {column}");
    }

    let signal = result.column("signal").unwrap();
    for &s in signal {
        assert!(s == 0.0 || s == 1.0, "signal must be binary, got {s}");
    }

    // cum_pnl is the running sum of pnl at every row
    let pnl = result.column("pnl").unwrap();
    let cum_pnl = result.column("cum_pnl").unwrap();
    let mut running = 0.0;
    for i in 0..result.len() {
        running += pnl[i];
        assert!(
            (cum_pnl[i] - running).abs() < 1e-6,
            "cum_pnl diverges from running sum at row {i}"
        );
    }

    // Mispricing is fair minus market on every row
    let cb_fair = result.column("cb_fair").unwrap();
    let cb_observed = result.column("cb_market").unwrap();
    let mispricing = result.column("mispricing").unwrap();
    for i in 0..result.len() {
        assert!((mispricing[i] - (cb_fair[i] - cb_observed[i])).abs() < 1e-9);
    }

    let records = backtest_records(&result).unwrap();
    assert_eq!(records.len(), 100);
    for record in &records {
        assert!(record.position == 0 || record.position == 1);
    }
}

#[test]
fn hedger_marks_every_date_of_the_path() {
    let contract = contract();
    let rates = FlatCurve::new(0.02);
    let dividends = FlatCurve::new(0.01);
    let spreads = FlatCurve::new(0.03);
    let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);

    let dates = weekdays(Date::from_ymd(2020, 1, 1).unwrap(), 100);
    let stock = simulate_gbm_path(100.0, 0.02, 0.01, VOL, &dates, 42);

    let hedger = DeltaHedger::new(market, ValuationSpec::new(STEPS, VOL), 100_000.0).unwrap();
    let history = hedger.run(&stock).unwrap();

    assert_eq!(history.len(), 100);
    for state in &history {
        assert!(state.delta >= 0.0);
        assert!(state.delta <= contract.conversion_ratio());
        assert!(state.hedge_shares >= 0.0);
    }
}

#[test]
fn signal_stages_compose_with_roll_down_repricing() {
    let contract = contract();
    let rates = FlatCurve::new(0.02);
    let dividends = FlatCurve::new(0.01);
    let spreads = FlatCurve::new(0.03);
    let market = MarketInputs::new(&contract, &rates, &dividends, &spreads);

    let dates = weekdays(Date::from_ymd(2020, 1, 1).unwrap(), 60);
    let stock = simulate_gbm_path(100.0, 0.02, 0.01, VOL, &dates, 7);
    let cb_market = synthetic_cb_market(&stock, 100.0, 1.0, 8);

    let spec = ValuationSpec::new(STEPS, VOL).with_reprice_mode(RepriceMode::RollDown);
    let table = compute_mispricing(&market, &spec, &cb_market, &stock).unwrap();
    let table = add_zscore_and_signal(table, &SignalConfig::new(20, -1.5, -0.5)).unwrap();

    assert_eq!(table.len(), 60);
    for &s in table.column("signal").unwrap() {
        assert!(s == 0.0 || s == 1.0);
    }
}
