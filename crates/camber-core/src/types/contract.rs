//! Convertible bond contract terms.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An embedded call or put provision.
///
/// The exercise price always applies at maturity. The optional trigger
/// barrier gates exercisability before maturity: a call is exercisable
/// only when the stock trades at or above its barrier, a put only when
/// the stock trades at or below its barrier. A provision without a
/// barrier is never exercisable before maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Provision {
    /// Exercise price of the provision.
    pub price: f64,
    /// Stock-price trigger level, if any.
    pub barrier: Option<f64>,
}

impl Provision {
    /// Creates a provision with no trigger barrier.
    #[must_use]
    pub fn new(price: f64) -> Self {
        Self {
            price,
            barrier: None,
        }
    }

    /// Sets the trigger barrier.
    #[must_use]
    pub fn with_barrier(mut self, barrier: f64) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

/// Immutable terms of a convertible bond.
///
/// Constructed once via [`builder`](ConvertibleContract::builder) with
/// eager validation, then shared read-only across all valuation calls.
///
/// # Example
///
/// ```rust
/// use camber_core::types::{ConvertibleContract, Provision};
///
/// let contract = ConvertibleContract::builder()
///     .face_value(100.0)
///     .coupon_rate(0.03)
///     .maturity(3.0)
///     .conversion_ratio(1.0)
///     .coupon_freq(2)
///     .call(Provision::new(103.0).with_barrier(130.0))
///     .build()
///     .unwrap();
///
/// assert_eq!(contract.coupon_freq(), 2);
/// assert!((contract.redemption_value() - 101.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertibleContract {
    face_value: f64,
    coupon_rate: f64,
    maturity: f64,
    conversion_ratio: f64,
    coupon_freq: u32,
    call: Option<Provision>,
    put: Option<Provision>,
}

impl ConvertibleContract {
    /// Creates a builder for convertible contracts.
    #[must_use]
    pub fn builder() -> ConvertibleContractBuilder {
        ConvertibleContractBuilder::default()
    }

    /// Face value of one bond.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annualized coupon rate (0.03 for 3%).
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Time to maturity in years.
    #[must_use]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Number of shares received per bond on conversion.
    #[must_use]
    pub fn conversion_ratio(&self) -> f64 {
        self.conversion_ratio
    }

    /// Coupon payments per year (1 = annual, 2 = semi-annual, 4 = quarterly).
    #[must_use]
    pub fn coupon_freq(&self) -> u32 {
        self.coupon_freq
    }

    /// The issuer call provision, if any.
    #[must_use]
    pub fn call(&self) -> Option<&Provision> {
        self.call.as_ref()
    }

    /// The holder put provision, if any.
    #[must_use]
    pub fn put(&self) -> Option<&Provision> {
        self.put.as_ref()
    }

    /// The cash amount of a single coupon payment.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.face_value * self.coupon_rate / f64::from(self.coupon_freq)
    }

    /// Redemption amount at maturity: face value plus the final coupon.
    #[must_use]
    pub fn redemption_value(&self) -> f64 {
        self.face_value + self.coupon_amount()
    }

    /// Stock value of converting one bond at the given stock price.
    #[must_use]
    pub fn conversion_value(&self, stock_price: f64) -> f64 {
        self.conversion_ratio * stock_price
    }
}

/// Builder for [`ConvertibleContract`].
///
/// All required fields must be set; `build` validates the full set of
/// contract invariants and fails eagerly on the first violation.
#[derive(Debug, Clone, Default)]
pub struct ConvertibleContractBuilder {
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    maturity: Option<f64>,
    conversion_ratio: Option<f64>,
    coupon_freq: Option<u32>,
    call: Option<Provision>,
    put: Option<Provision>,
}

impl ConvertibleContractBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annualized coupon rate (0.03 for 3%).
    #[must_use]
    pub fn coupon_rate(mut self, coupon_rate: f64) -> Self {
        self.coupon_rate = Some(coupon_rate);
        self
    }

    /// Sets the time to maturity in years.
    #[must_use]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the conversion ratio.
    #[must_use]
    pub fn conversion_ratio(mut self, conversion_ratio: f64) -> Self {
        self.conversion_ratio = Some(conversion_ratio);
        self
    }

    /// Sets the number of coupon payments per year.
    #[must_use]
    pub fn coupon_freq(mut self, coupon_freq: u32) -> Self {
        self.coupon_freq = Some(coupon_freq);
        self
    }

    /// Sets the issuer call provision.
    #[must_use]
    pub fn call(mut self, call: Provision) -> Self {
        self.call = Some(call);
        self
    }

    /// Sets the holder put provision.
    #[must_use]
    pub fn put(mut self, put: Provision) -> Self {
        self.put = Some(put);
        self
    }

    /// Builds the contract, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidContract` if:
    /// - a required field is missing
    /// - `face_value`, `maturity`, or `conversion_ratio` is not positive
    /// - `coupon_rate` is negative
    /// - `coupon_freq` is zero
    /// - a provision has a non-positive price or barrier
    pub fn build(self) -> CoreResult<ConvertibleContract> {
        let face_value = self
            .face_value
            .ok_or_else(|| CoreError::invalid_contract("face_value is required"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| CoreError::invalid_contract("coupon_rate is required"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| CoreError::invalid_contract("maturity is required"))?;
        let conversion_ratio = self
            .conversion_ratio
            .ok_or_else(|| CoreError::invalid_contract("conversion_ratio is required"))?;
        let coupon_freq = self
            .coupon_freq
            .ok_or_else(|| CoreError::invalid_contract("coupon_freq is required"))?;

        if face_value <= 0.0 {
            return Err(CoreError::invalid_contract(format!(
                "face_value must be positive, got {face_value}"
            )));
        }
        if coupon_rate < 0.0 {
            return Err(CoreError::invalid_contract(format!(
                "coupon_rate must be non-negative, got {coupon_rate}"
            )));
        }
        if maturity <= 0.0 {
            return Err(CoreError::invalid_contract(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if conversion_ratio <= 0.0 {
            return Err(CoreError::invalid_contract(format!(
                "conversion_ratio must be positive, got {conversion_ratio}"
            )));
        }
        if coupon_freq == 0 {
            return Err(CoreError::invalid_contract("coupon_freq must be positive"));
        }

        for (label, provision) in [("call", &self.call), ("put", &self.put)] {
            if let Some(p) = provision {
                if p.price <= 0.0 {
                    return Err(CoreError::invalid_contract(format!(
                        "{label} price must be positive, got {}",
                        p.price
                    )));
                }
                if let Some(barrier) = p.barrier {
                    if barrier <= 0.0 {
                        return Err(CoreError::invalid_contract(format!(
                            "{label} barrier must be positive, got {barrier}"
                        )));
                    }
                }
            }
        }

        Ok(ConvertibleContract {
            face_value,
            coupon_rate,
            maturity,
            conversion_ratio,
            coupon_freq,
            call: self.call,
            put: self.put,
        })
    }
}
