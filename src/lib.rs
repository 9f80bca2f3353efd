//! # Savvy Shopper
//!
//! Concurrent price comparison across retailer search backends.
//!
//! A query is fanned out to every registered [`RetailerSearcher`], each
//! searcher contributes at most three offers, and the merged pool is sorted
//! by ascending price and cut to the six cheapest. The whole call runs under
//! one deadline; a call that misses it fails as a network error.
//!
//! # Layers
//!
//! - [`domain`]: offers, prices, retailers, errors and the search context
//! - [`application`]: the aggregation engine and ranking
//! - [`infrastructure`]: retailer adapters and configuration
//! - [`api`]: table rendering and the command line runner
//!
//! # Example
//!
//! ```no_run
//! use savvy_shopper::application::services::OfferAggregationEngine;
//! use savvy_shopper::infrastructure::config::{ApiKey, AppConfig};
//! use savvy_shopper::infrastructure::retailers::default_registry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None)?;
//! let registry = default_registry(&config.zinc, config.retry, ApiKey::from_env()?)?;
//! let engine = OfferAggregationEngine::new(registry, config.aggregation);
//!
//! for offer in engine.aggregate("usb c cable").await? {
//!     println!("{offer}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`RetailerSearcher`]: infrastructure::retailers::RetailerSearcher

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
