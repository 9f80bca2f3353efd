//! # Fixture Searcher
//!
//! Offline searcher serving canned offers from a JSON file.
//!
//! The file lists offers for every retailer; each [`FixtureSearcher`] returns
//! the entries belonging to its own retailer, regardless of the query:
//!
//! ```text
//! {"offers": [
//!   {"title": "Mock Product 1", "price": 19.99, "url": "https://example.com/1", "retailer": "Amazon"},
//!   {"title": "Mock Product 2", "price": 29.99, "url": "https://example.com/2", "retailer": "Walmart"}
//! ]}
//! ```

use crate::domain::context::SearchContext;
use crate::domain::entities::Offer;
use crate::domain::errors::SearchResult;
use crate::domain::value_objects::{Price, Retailer};
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::retailers::traits::{RetailerRegistry, RetailerSearcher};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FixtureFile {
    offers: Vec<FixtureOffer>,
}

#[derive(Debug, Deserialize)]
struct FixtureOffer {
    title: String,
    price: f64,
    #[serde(default)]
    url: String,
    retailer: Retailer,
}

/// Searcher returning a fixed set of offers.
#[derive(Debug, Clone)]
pub struct FixtureSearcher {
    retailer: Retailer,
    offers: Vec<Offer>,
    latency: Duration,
}

impl FixtureSearcher {
    /// Creates a searcher that answers every query with `offers`.
    #[must_use]
    pub fn new(retailer: Retailer, offers: Vec<Offer>) -> Self {
        Self {
            retailer,
            offers,
            latency: Duration::ZERO,
        }
    }

    /// Delays every answer by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the canned offers.
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Parses a fixture document and builds one searcher per retailer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Fixture` if the document is malformed or
    /// contains a non-finite price.
    pub fn registry_from_json(json: &str, origin: &Path) -> Result<RetailerRegistry, ConfigError> {
        let file: FixtureFile = serde_json::from_str(json)
            .map_err(|e| ConfigError::fixture(origin, e.to_string()))?;

        let mut registry = RetailerRegistry::new();
        for retailer in Retailer::ALL {
            let offers = file
                .offers
                .iter()
                .filter(|entry| entry.retailer == retailer)
                .map(|entry| {
                    let price = Price::from_f64(entry.price).ok_or_else(|| {
                        ConfigError::fixture(origin, format!("invalid price for '{}'", entry.title))
                    })?;
                    Ok(Offer::new(entry.title.clone(), price, entry.url.clone())
                        .with_retailer(retailer))
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;
            registry.insert(retailer, Arc::new(Self::new(retailer, offers)));
        }
        Ok(registry)
    }

    /// Reads a fixture file and builds one searcher per retailer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Fixture` if the file cannot be read or parsed.
    pub fn registry_from_file(path: &Path) -> Result<RetailerRegistry, ConfigError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| ConfigError::fixture(path, e.to_string()))?;
        Self::registry_from_json(&json, path)
    }
}

#[async_trait]
impl RetailerSearcher for FixtureSearcher {
    fn retailer(&self) -> Retailer {
        self.retailer
    }

    async fn search(&self, _query: &str, ctx: &SearchContext) -> SearchResult<Vec<Offer>> {
        ctx.run(async {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            Ok(self.offers.clone())
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::SearchError;

    const MOCK_DATA: &str = r#"{
        "offers": [
            {"title": "Mock Product 1", "price": 19.99, "url": "https://example.com/1", "retailer": "Amazon"},
            {"title": "Mock Product 2", "price": 29.99, "url": "https://example.com/2", "retailer": "Walmart"}
        ]
    }"#;

    #[tokio::test]
    async fn splits_offers_by_retailer() {
        let registry =
            FixtureSearcher::registry_from_json(MOCK_DATA, Path::new("mock_data.json")).unwrap();
        assert_eq!(registry.len(), 2);

        let ctx = SearchContext::background();
        let amazon = registry
            .get(Retailer::Amazon)
            .unwrap()
            .search("anything", &ctx)
            .await
            .unwrap();
        assert_eq!(amazon.len(), 1);
        assert_eq!(amazon[0].title(), "Mock Product 1");
        assert_eq!(amazon[0].retailer(), Some(Retailer::Amazon));

        let walmart = registry
            .get(Retailer::Walmart)
            .unwrap()
            .search("anything", &ctx)
            .await
            .unwrap();
        assert_eq!(walmart[0].price(), Price::from_f64(29.99).unwrap());
    }

    #[test]
    fn malformed_document_is_fixture_error() {
        let result = FixtureSearcher::registry_from_json("{", Path::new("bad.json"));
        assert!(matches!(result, Err(ConfigError::Fixture { .. })));
    }

    #[test]
    fn missing_file_is_fixture_error() {
        let result = FixtureSearcher::registry_from_file(Path::new("/nonexistent/offers.json"));
        assert!(matches!(result, Err(ConfigError::Fixture { .. })));
    }

    #[tokio::test]
    async fn latency_respects_deadline() {
        let searcher =
            FixtureSearcher::new(Retailer::Amazon, Vec::new()).with_latency(Duration::from_secs(5));
        let ctx = SearchContext::with_timeout(Duration::from_millis(20));
        let result = searcher.search("q", &ctx).await;
        assert!(matches!(result, Err(SearchError::Timeout { .. })));
    }
}
