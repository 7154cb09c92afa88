//! Domain types for convertible bond analytics.
//!
//! This module provides the core value objects:
//!
//! - [`Date`]: Calendar date newtype for time-series indexing
//! - [`DailySeries`]: Ordered date-indexed numeric series
//! - [`TimeTable`]: Date-indexed table with named numeric columns
//! - [`ConvertibleContract`]: Immutable convertible bond contract terms

mod contract;
mod date;
mod series;
mod table;

pub use contract::{ConvertibleContract, ConvertibleContractBuilder, Provision};
pub use date::Date;
pub use series::DailySeries;
pub use table::TimeTable;
