//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`Retailer`] - Supported retail sources that can be searched
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported retailer.
///
/// The set of searchers invoked for a query is exactly the set of registered
/// retailers.
///
/// # Examples
///
/// ```
/// use savvy_shopper::domain::value_objects::enums::Retailer;
///
/// assert_eq!(Retailer::Amazon.to_string(), "Amazon");
/// assert_eq!(Retailer::Walmart.slug(), "walmart");
/// assert_eq!("walmart".parse::<Retailer>().unwrap(), Retailer::Walmart);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Retailer {
    /// Amazon marketplace.
    Amazon = 0,
    /// Walmart marketplace.
    Walmart = 1,
}

impl Retailer {
    /// Every supported retailer, in registration order.
    pub const ALL: [Retailer; 2] = [Retailer::Amazon, Retailer::Walmart];

    /// Returns the display name used on the wire and in rendered output.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Walmart => "Walmart",
        }
    }

    /// Returns the lowercase path segment used by search backends.
    #[inline]
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::Walmart => "walmart",
        }
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Retailer {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AMAZON" => Ok(Self::Amazon),
            "WALMART" => Ok(Self::Walmart),
            _ => Err(ParseEnumError::InvalidValue("Retailer", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
