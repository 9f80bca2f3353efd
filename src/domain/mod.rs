//! # Domain Layer
//!
//! Core types of the price comparison: offers, retailers, prices, the
//! classified error taxonomy and the cancellable search context.

pub mod context;
pub mod entities;
pub mod errors;
pub mod value_objects;
