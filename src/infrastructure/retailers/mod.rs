//! # Retailer Searchers
//!
//! Adapters turning a product query into offers from one retailer.
//!
//! - [`RetailerSearcher`]: the port every retailer backend implements
//! - [`RetailerRegistry`]: retailer → searcher mapping used by the engine
//! - [`ZincSearcher`]: HTTP searcher for the Zinc search API
//! - [`FixtureSearcher`]: canned offers for offline runs and tests

pub mod fixture;
pub mod http_client;
pub mod retry;
pub mod traits;
pub mod zinc;

pub use fixture::FixtureSearcher;
pub use http_client::HttpClient;
pub use retry::RetryPolicy;
pub use traits::{RetailerRegistry, RetailerSearcher};
pub use zinc::{ZincSearcher, default_registry};
