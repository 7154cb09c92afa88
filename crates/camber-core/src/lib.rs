//! # Camber Core
//!
//! Core types and abstractions for the Camber convertible bond analytics library.
//!
//! This crate provides the foundational building blocks used throughout Camber:
//!
//! - **Types**: Domain-specific types like [`Date`], [`DailySeries`], [`TimeTable`]
//! - **Contracts**: The immutable [`ConvertibleContract`] value object
//! - **Errors**: Structured error handling via [`CoreError`]
//!
//! ## Design Philosophy
//!
//! - **Immutable Inputs**: Contracts and curves are built once and never mutated
//! - **Fail Fast**: Precondition violations surface at construction time
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use camber_core::prelude::*;
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
//! assert!((contract.coupon_amount() - 1.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{ConvertibleContract, DailySeries, Date, Provision, TimeTable};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        ConvertibleContract, ConvertibleContractBuilder, DailySeries, Date, Provision, TimeTable,
    };
}
