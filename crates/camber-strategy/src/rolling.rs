//! Rolling statistics over a fixed lookback window.
//!
//! Positions with fewer observations than the minimum period carry NaN,
//! which downstream consumers treat as "no value yet": all comparisons
//! against NaN are false, so the signal machine holds its state through
//! the warmup.

/// Rolling mean over the trailing `window` observations.
///
/// Position `i` averages `values[i + 1 - window ..= i]` (clipped at the
/// start of the slice). Positions with fewer than
/// `max(min_periods, 1)` observations are NaN.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let min_periods = min_periods.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let window_slice = trailing_window(values, i, window);
            if window_slice.len() < min_periods {
                f64::NAN
            } else {
                mean(window_slice)
            }
        })
        .collect()
}

/// Rolling sample standard deviation over the trailing `window`
/// observations.
///
/// Uses the n−1 (sample) estimator. Positions with fewer than
/// `max(min_periods, 2)` observations are NaN, since the estimator is
/// undefined for a single observation.
#[must_use]
pub fn rolling_std(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    let min_periods = min_periods.max(2);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let window_slice = trailing_window(values, i, window);
            let n = window_slice.len();
            if n < min_periods {
                f64::NAN
            } else {
                let m = mean(window_slice);
                let sum_sq: f64 = window_slice.iter().map(|&x| (x - m) * (x - m)).sum();
                (sum_sq / (n - 1) as f64).sqrt()
            }
        })
        .collect()
}

fn trailing_window(values: &[f64], i: usize, window: usize) -> &[f64] {
    let start = (i + 1).saturating_sub(window);
    &values[start..=i]
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
