//! Date type for time-series indexing.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar date for time-series indexing.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing the
/// operations needed for daily valuation runs and ensuring type safety.
///
/// # Example
///
/// ```rust
/// use camber_core::types::Date;
///
/// let date = Date::from_ymd(2025, 6, 15).unwrap();
/// let next = date.add_days(1);
/// assert!(next > date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Returns the number of calendar days from `self` to `other`.
    ///
    /// Positive when `other` is after `self`.
    #[must_use]
    pub fn days_until(&self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the ACT/365F year fraction from `self` to `other`.
    ///
    /// Negative when `other` is before `self`.
    #[must_use]
    pub fn year_fraction(&self, other: Date) -> f64 {
        self.days_until(other) as f64 / 365.0
    }

    /// Returns true if the date falls on Monday through Friday.
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the next weekday strictly after this date.
    #[must_use]
    pub fn next_weekday(&self) -> Self {
        let mut d = self.add_days(1);
        while !d.is_weekday() {
            d = d.add_days(1);
        }
        d
    }

    /// Returns the underlying `chrono::NaiveDate`.
    #[must_use]
    pub fn inner(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Date(d)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_from_ymd_invalid() {
        assert!(Date::from_ymd(2024, 2, 30).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
    }

    #[test]
    fn test_parse() {
        let date = Date::parse("2020-01-01").unwrap();
        assert_eq!(date, Date::from_ymd(2020, 1, 1).unwrap());
        assert!(Date::parse("not-a-date").is_err());
    }

    #[test]
    fn test_ordering_and_arithmetic() {
        let d1 = Date::from_ymd(2020, 1, 1).unwrap();
        let d2 = d1.add_days(10);
        assert!(d2 > d1);
        assert_eq!(d1.days_until(d2), 10);
        assert_eq!(d2.days_until(d1), -10);
    }

    #[test]
    fn test_year_fraction_act365() {
        let d1 = Date::from_ymd(2020, 1, 1).unwrap();
        let d2 = d1.add_days(365);
        assert_relative_eq!(d1.year_fraction(d2), 1.0, epsilon = 1e-12);

        let d3 = d1.add_days(73);
        assert_relative_eq!(d1.year_fraction(d3), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_weekdays() {
        // 2020-01-01 was a Wednesday
        let wed = Date::from_ymd(2020, 1, 1).unwrap();
        assert!(wed.is_weekday());

        let sat = Date::from_ymd(2020, 1, 4).unwrap();
        assert!(!sat.is_weekday());

        // Friday rolls over the weekend to Monday
        let fri = Date::from_ymd(2020, 1, 3).unwrap();
        assert_eq!(fri.next_weekday(), Date::from_ymd(2020, 1, 6).unwrap());
    }

    #[test]
    fn test_serde_roundtrip() {
        let date = Date::from_ymd(2020, 3, 31).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2020-03-31\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
