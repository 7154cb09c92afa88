//! # Camber Pricing
//!
//! Binomial lattice convertible bond pricer for the Camber analytics library.
//!
//! This crate provides:
//!
//! - **Lattice Builder**: [`StockLattice`], a recombining CRR binomial
//!   price tree for the underlying stock
//! - **Convertible Pricer**: [`ConvertiblePricer`], backward induction
//!   over the lattice with conversion, issuer call, and holder put
//!   optionality under credit-spread-adjusted discounting
//! - **Sensitivities**: a root-level delta via one-step finite difference
//!
//! ## Quick Start
//!
//! ```rust
//! use camber_core::prelude::*;
//! use camber_curves::FlatCurve;
//! use camber_pricing::ConvertiblePricer;
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
//!
//! let pricer = ConvertiblePricer::new(&contract, &rates, &dividends, &spreads, 0.25, 50);
//! let valuation = pricer.price(100.0).unwrap();
//!
//! assert!(valuation.price > 0.0);
//! assert!(valuation.delta >= 0.0 && valuation.delta <= 1.0);
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
#![allow(clippy::similar_names)]
#![allow(clippy::needless_range_loop)]

mod convertible;
pub mod error;
mod lattice;

pub use convertible::{ConvertiblePricer, ExerciseDecision, Valuation};
pub use error::{PricingError, PricingResult};
pub use lattice::StockLattice;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convertible::{ConvertiblePricer, ExerciseDecision, Valuation};
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::lattice::StockLattice;
}
