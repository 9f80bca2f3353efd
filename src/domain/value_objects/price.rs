//! # Price
//!
//! Decimal currency amount attached to an offer.
//!
//! Unlike most value objects, a [`Price`] does not reject negative amounts on
//! construction: backends occasionally report them, and the aggregation engine
//! must be able to see such a value in order to fail the call instead of
//! dropping the record.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency amount with exact decimal arithmetic.
///
/// # Examples
///
/// ```
/// use savvy_shopper::domain::value_objects::Price;
///
/// let price = Price::from_cents(1999);
/// assert_eq!(price.to_string(), "19.99");
/// assert!(!price.is_negative());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wraps a decimal amount.
    #[inline]
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Builds a price from a whole number of cents.
    #[inline]
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Converts a floating point amount, as reported by JSON backends.
    ///
    /// Returns `None` for NaN or infinite values.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64(value).map(Self)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is below zero.
    #[inline]
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
