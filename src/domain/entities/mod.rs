//! # Domain Entities
//!
//! - [`Offer`]: A product listing from one retailer

pub mod offer;

pub use offer::Offer;
