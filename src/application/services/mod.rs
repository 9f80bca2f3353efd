//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`OfferAggregationEngine`]: Concurrent offer collection across retailers
//! - [`offer_ranking`]: Ordering, capping and validation of the merged pool

pub mod offer_aggregation;
pub mod offer_ranking;

pub use offer_aggregation::{AggregationConfig, CallState, OfferAggregationEngine};
pub use offer_ranking::{rank_offers, settle};
