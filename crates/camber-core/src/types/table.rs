//! Date-indexed table with named numeric columns.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{DailySeries, Date};

/// A date-indexed table of named `f64` columns.
///
/// This is the result container for batch runs: a shared ordered date
/// index plus any number of equal-length columns, looked up by name.
/// Columns preserve insertion order.
///
/// # Example
///
/// ```rust
/// use camber_core::types::{Date, TimeTable};
///
/// let start = Date::from_ymd(2020, 1, 1).unwrap();
/// let dates: Vec<Date> = (0..3).map(|i| start.add_days(i)).collect();
///
/// let table = TimeTable::new(dates)
///     .with_column("stock", vec![100.0, 101.0, 102.0])
///     .unwrap();
///
/// assert_eq!(table.column("stock").unwrap()[1], 101.0);
/// assert!(table.column("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTable {
    dates: Vec<Date>,
    columns: Vec<(String, Vec<f64>)>,
}

impl TimeTable {
    /// Creates an empty table over the given date index.
    #[must_use]
    pub fn new(dates: Vec<Date>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    /// Creates a table sharing the index of an existing series.
    #[must_use]
    pub fn with_index_of(series: &DailySeries) -> Self {
        Self::new(series.dates().to_vec())
    }

    /// Adds a column, consuming and returning the table.
    ///
    /// An existing column with the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSeries` if the column length does not
    /// match the date index.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> CoreResult<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Adds a column in place.
    ///
    /// An existing column with the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSeries` if the column length does not
    /// match the date index.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> CoreResult<()> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(CoreError::invalid_series(format!(
                "column '{name}' has {} values for {} dates",
                values.len(),
                self.dates.len()
            )));
        }
        if let Some(existing) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = values;
        } else {
            self.columns.push((name, values));
        }
        Ok(())
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the column with the given name, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Returns true if a column with the given name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Returns column names in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }
}
