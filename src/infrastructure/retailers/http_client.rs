//! # HTTP Client Utilities
//!
//! Shared HTTP client for retailer searchers.
//!
//! Wraps `reqwest` with a per-request timeout, JSON bodies, optional basic
//! authentication and a mapping from transport failures and status codes to
//! classified [`SearchError`]s.
//!
//! # Examples
//!
//! ```ignore
//! use savvy_shopper::infrastructure::retailers::http_client::HttpClient;
//!
//! let client = HttpClient::new(10_000)?;
//! let response: MyResponse = client.post("https://api.example.com/search", &body, None).await?;
//! ```

use crate::domain::errors::{SearchError, SearchResult};
use crate::infrastructure::config::ApiKey;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for retailer searchers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Network` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| SearchError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a POST request with a JSON body and deserializes the JSON response.
    ///
    /// When `credential` is given it is sent as the basic-auth user name with
    /// an empty password.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Authentication` for 401/403 responses,
    /// `SearchError::Timeout` or `SearchError::Network` for transport and
    /// other status failures, and `SearchError::Integrity` if the response
    /// cannot be parsed.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        credential: Option<&ApiKey>,
    ) -> SearchResult<T> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = credential {
            request = request.basic_auth(key.expose(), Some(""));
        }

        let response = request.send().await.map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> SearchResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| SearchError::integrity(format!("failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a SearchError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SearchError {
        if error.is_timeout() {
            SearchError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            SearchError::network(format!("connection failed: {}", error))
        } else {
            SearchError::network(format!("failed to send request: {}", error))
        }
    }

    /// Maps an HTTP status code to a SearchError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> SearchError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                SearchError::authentication(format!("unauthorized request ({}): {}", status, body))
            }
            _ => SearchError::network(format!("unexpected status code ({}): {}", status, body)),
        }
    }
}
