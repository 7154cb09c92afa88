//! # Camber Curves
//!
//! Rate curve abstractions for the Camber convertible bond analytics library.
//!
//! This crate provides:
//!
//! - **Curve Trait**: The core [`RateCurve`] trait mapping elapsed time in
//!   years to an annualized rate
//! - **Flat Curves**: [`FlatCurve`] for constant rates
//! - **Piecewise Curves**: [`PiecewiseConstantCurve`] step functions
//! - **Interpolated Curves**: [`InterpolatedCurve`] with linear
//!   interpolation between pillars
//!
//! The same trait serves risk-free rates, dividend/borrow rates, and
//! credit spreads; the role a curve plays is decided by where the caller
//! injects it.
//!
//! ## Quick Start
//!
//! ```rust
//! use camber_curves::prelude::*;
//!
//! let flat = FlatCurve::new(0.02);
//! assert_eq!(flat.rate(1.5), 0.02);
//!
//! // Closures implement RateCurve too
//! let sloped = |t: f64| 0.02 + 0.01 * t;
//! assert!((sloped.rate(1.0) - 0.03).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
mod flat;
mod interpolated;
mod piecewise;
pub mod traits;

pub use error::{CurveError, CurveResult};
pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use piecewise::PiecewiseConstantCurve;
pub use traits::RateCurve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::flat::FlatCurve;
    pub use crate::interpolated::InterpolatedCurve;
    pub use crate::piecewise::PiecewiseConstantCurve;
    pub use crate::traits::RateCurve;
}
