//! Ordered date-indexed numeric series.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// An ordered, date-indexed series of `f64` values.
///
/// This is the input container for market observations: one value per
/// date, with a strictly increasing date index. It is deliberately
/// minimal; alignment between two series is checked by the consumer via
/// [`index_eq`](DailySeries::index_eq).
///
/// # Example
///
/// ```rust
/// use camber_core::types::{DailySeries, Date};
///
/// let start = Date::from_ymd(2020, 1, 1).unwrap();
/// let dates: Vec<Date> = (0..5).map(|i| start.add_days(i)).collect();
/// let series = DailySeries::new(dates, vec![100.0, 101.0, 99.5, 102.0, 103.0]).unwrap();
///
/// assert_eq!(series.len(), 5);
/// assert_eq!(series.values()[2], 99.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl DailySeries {
    /// Creates a new series from a date index and values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSeries` if:
    /// - `dates` and `values` have different lengths
    /// - the series is empty
    /// - dates are not strictly increasing
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> CoreResult<Self> {
        if dates.len() != values.len() {
            return Err(CoreError::invalid_series(format!(
                "dates ({}) and values ({}) must have same length",
                dates.len(),
                values.len()
            )));
        }
        if dates.is_empty() {
            return Err(CoreError::invalid_series("series must not be empty"));
        }
        for i in 1..dates.len() {
            if dates[i] <= dates[i - 1] {
                return Err(CoreError::invalid_series(format!(
                    "dates must be strictly increasing at index {i}: {} >= {}",
                    dates[i - 1],
                    dates[i]
                )));
            }
        }
        Ok(Self { dates, values })
    }

    /// Creates a series from `(date, value)` pairs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](DailySeries::new).
    pub fn from_pairs(pairs: Vec<(Date, f64)>) -> CoreResult<Self> {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Creates a series holding the same value on every date.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](DailySeries::new).
    pub fn constant(dates: Vec<Date>, value: f64) -> CoreResult<Self> {
        let values = vec![value; dates.len()];
        Self::new(dates, values)
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the series has no observations.
    ///
    /// Always false for a successfully constructed series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the first date of the index.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.dates[0]
    }

    /// Returns the `(date, value)` observation at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn at(&self, i: usize) -> (Date, f64) {
        (self.dates[i], self.values[i])
    }

    /// Iterates over `(date, value)` observations in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns true if `other` has an identical ordered date index.
    #[must_use]
    pub fn index_eq(&self, other: &DailySeries) -> bool {
        self.dates == other.dates
    }
}
