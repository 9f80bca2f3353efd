//! # Infrastructure Layer
//!
//! Adapters to the outside world: retailer search backends and configuration.

pub mod config;
pub mod retailers;
