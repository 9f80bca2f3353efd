//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Retailer`]: Supported retail sources
//! - [`Price`]: Decimal currency amount

pub mod enums;
pub mod price;

pub use enums::{ParseEnumError, Retailer};
pub use price::Price;
