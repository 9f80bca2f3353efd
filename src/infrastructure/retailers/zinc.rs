//! # Zinc Searcher
//!
//! Retailer searcher backed by the Zinc product search API.
//!
//! One [`ZincSearcher`] serves one retailer. A search is a JSON `POST` to
//! `<base_url>/<retailer slug>`:
//!
//! ```text
//! {"search_term": "usb cable", "retailer": "Amazon", "max_results": 3}
//! ```
//!
//! answered by
//!
//! ```text
//! {"results": [{"title": "...", "price": 8.99, "url": "https://..."}]}
//! ```

use crate::domain::context::SearchContext;
use crate::domain::entities::Offer;
use crate::domain::errors::{SearchError, SearchResult};
use crate::domain::value_objects::{Price, Retailer};
use crate::infrastructure::config::{ApiKey, ZincSettings};
use crate::infrastructure::retailers::http_client::HttpClient;
use crate::infrastructure::retailers::retry::RetryPolicy;
use crate::infrastructure::retailers::traits::{RetailerRegistry, RetailerSearcher};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of results requested from the backend per retailer.
pub const MAX_RESULTS: usize = 3;

/// Search request body.
#[derive(Debug, Serialize)]
struct ZincSearchRequest<'a> {
    search_term: &'a str,
    retailer: Retailer,
    max_results: usize,
}

/// Search response body.
#[derive(Debug, Deserialize)]
struct ZincSearchResponse {
    #[serde(default)]
    results: Vec<ZincSearchResult>,
}

#[derive(Debug, Deserialize)]
struct ZincSearchResult {
    title: String,
    price: f64,
    #[serde(default)]
    url: String,
}

impl ZincSearchResult {
    fn into_offer(self, retailer: Retailer) -> SearchResult<Offer> {
        let price = Price::from_f64(self.price).ok_or_else(|| {
            SearchError::integrity(format!("unrepresentable price for '{}'", self.title))
        })?;
        Ok(Offer::new(self.title, price, self.url).with_retailer(retailer))
    }
}

/// Searcher for one retailer through the Zinc API.
#[derive(Debug, Clone)]
pub struct ZincSearcher {
    retailer: Retailer,
    endpoint: String,
    client: HttpClient,
    api_key: Option<ApiKey>,
    retry: RetryPolicy,
}

impl ZincSearcher {
    /// Creates a searcher posting to `endpoint`.
    #[must_use]
    pub fn new(retailer: Retailer, endpoint: impl Into<String>, client: HttpClient) -> Self {
        Self {
            retailer,
            endpoint: endpoint.into(),
            client,
            api_key: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a searcher for `retailer` from backend settings.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Network` if the HTTP client cannot be created.
    pub fn from_settings(retailer: Retailer, settings: &ZincSettings) -> SearchResult<Self> {
        let client = HttpClient::new(settings.request_timeout_ms)?;
        let endpoint = format!(
            "{}/{}",
            settings.base_url.trim_end_matches('/'),
            retailer.slug()
        );
        Ok(Self::new(retailer, endpoint, client))
    }

    /// Sets the credential sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the endpoint this searcher posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RetailerSearcher for ZincSearcher {
    fn retailer(&self) -> Retailer {
        self.retailer
    }

    async fn search(&self, query: &str, ctx: &SearchContext) -> SearchResult<Vec<Offer>> {
        let request = ZincSearchRequest {
            search_term: query,
            retailer: self.retailer,
            max_results: MAX_RESULTS,
        };

        let response: ZincSearchResponse = self
            .retry
            .run(ctx, || {
                self.client
                    .post(&self.endpoint, &request, self.api_key.as_ref())
            })
            .await?;

        tracing::debug!(
            retailer = %self.retailer,
            results = response.results.len(),
            "zinc search completed"
        );

        response
            .results
            .into_iter()
            .map(|result| result.into_offer(self.retailer))
            .collect()
    }
}

/// Builds the default registry: one Zinc searcher per supported retailer.
///
/// # Errors
///
/// Returns `SearchError::Network` if an HTTP client cannot be created.
pub fn default_registry(
    settings: &ZincSettings,
    retry: RetryPolicy,
    api_key: ApiKey,
) -> SearchResult<RetailerRegistry> {
    let mut registry = RetailerRegistry::new();
    for retailer in Retailer::ALL {
        let searcher = ZincSearcher::from_settings(retailer, settings)?
            .with_api_key(api_key.clone())
            .with_retry(retry);
        registry.insert(retailer, Arc::new(searcher));
    }
    Ok(registry)
}
