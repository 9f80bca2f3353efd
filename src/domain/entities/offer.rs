//! # Offer Entity
//!
//! A single product listing returned by a retailer search.
//!
//! # Examples
//!
//! ```
//! use savvy_shopper::domain::entities::Offer;
//! use savvy_shopper::domain::value_objects::{Price, Retailer};
//!
//! let offer = Offer::new("USB-C cable", Price::from_cents(899), "https://example.com/cable")
//!     .with_retailer(Retailer::Amazon);
//!
//! assert_eq!(offer.retailer(), Some(Retailer::Amazon));
//! assert_eq!(offer.price(), Price::from_cents(899));
//! ```

use crate::domain::value_objects::{Price, Retailer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product offer from one retailer.
///
/// Offers are immutable values. The only transformation the aggregation
/// engine applies is re-tagging the source retailer via
/// [`Offer::with_retailer`], which consumes the offer and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Listing title.
    title: String,
    /// Listed price.
    price: Price,
    /// Link to the listing.
    url: String,
    /// Source retailer, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retailer: Option<Retailer>,
}

impl Offer {
    /// Creates an offer without a retailer tag.
    #[must_use]
    pub fn new(title: impl Into<String>, price: Price, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            url: url.into(),
            retailer: None,
        }
    }

    /// Returns this offer tagged with the given retailer.
    #[must_use]
    pub fn with_retailer(self, retailer: Retailer) -> Self {
        Self {
            retailer: Some(retailer),
            ..self
        }
    }

    /// Returns the listing title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the listed price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the listing URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the source retailer, if tagged.
    #[inline]
    #[must_use]
    pub fn retailer(&self) -> Option<Retailer> {
        self.retailer
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offer({} @ {}", self.title, self.price)?;
        if let Some(retailer) = self.retailer {
            write!(f, " from {}", retailer)?;
        }
        write!(f, ")")
    }
}
