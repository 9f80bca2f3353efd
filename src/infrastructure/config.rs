//! # Configuration
//!
//! Application settings and credential loading.
//!
//! [`AppConfig::load`] layers, from lowest to highest precedence:
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. `SAVVY_`-prefixed environment variables, using `__` between nested keys
//!    (for example `SAVVY_AGGREGATION__TIMEOUT_MS=1500`).
//!
//! A `.env` file in the working directory is read into the environment first.
//!
//! # Examples
//!
//! ```
//! use savvy_shopper::infrastructure::config::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.aggregation.timeout_ms, 2000);
//! assert_eq!(config.aggregation.per_source_cap, 3);
//! assert_eq!(config.aggregation.global_cap, 6);
//! assert!(config.validate().is_ok());
//! ```

use crate::application::services::offer_aggregation::AggregationConfig;
use crate::domain::errors::{SearchError, SearchResult};
use crate::infrastructure::retailers::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the search backend API key.
pub const API_KEY_ENV: &str = "ZINC_API_KEY";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SAVVY";

/// Default search backend base URL.
const DEFAULT_ZINC_BASE_URL: &str = "https://api.zinc.io/v1/search";

/// Default per-request HTTP timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A setting is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A fixture file could not be read or parsed.
    #[error("fixture error: {path}: {message}")]
    Fixture {
        /// The fixture path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid setting error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Creates a fixture error.
    #[must_use]
    pub fn fixture(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Fixture {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Settings for the Zinc search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZincSettings {
    /// Base URL; the retailer slug is appended as the last path segment.
    pub base_url: String,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ZincSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ZINC_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

/// Populates the process environment from a `.env` file, if one exists.
fn load_dotenv() -> Option<PathBuf> {
    check_dotenv(dotenvy::dotenv())
}

/// Logs a `.env` failure other than the file being absent.
fn check_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read .env file");
            None
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Aggregation engine settings.
    pub aggregation: AggregationConfig,
    /// Search backend settings.
    pub zinc: ZincSettings,
    /// Per-searcher retry settings.
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be read or parsed, and
    /// `ConfigError::Invalid` if a setting is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        load_dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aggregation.timeout_ms == 0 {
            return Err(ConfigError::invalid("aggregation.timeout_ms must be positive"));
        }
        if self.aggregation.per_source_cap == 0 {
            return Err(ConfigError::invalid("aggregation.per_source_cap must be at least 1"));
        }
        if self.aggregation.global_cap == 0 {
            return Err(ConfigError::invalid("aggregation.global_cap must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::invalid("retry.max_attempts must be at least 1"));
        }
        if self.zinc.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("zinc.base_url must not be empty"));
        }
        Ok(())
    }
}

/// API key for the search backend.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key value.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Authentication` if the value is blank.
    pub fn new(value: impl Into<String>) -> SearchResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SearchError::authentication(format!("{} is not set", API_KEY_ENV)));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Reads the key from the process environment (after loading `.env`).
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Authentication` if the variable is missing or blank.
    pub fn from_env() -> SearchResult<Self> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the key through `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Authentication` if the variable is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> SearchResult<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        Self::new(lookup(API_KEY_ENV).unwrap_or_default())
    }

    /// Returns the raw key value.
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
