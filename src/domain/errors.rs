//! # Search Errors
//!
//! Classified failures produced by retailer searchers and by the
//! aggregation engine.
//!
//! Every failure falls into one of the [`ErrorKind`] categories. Only
//! [`ErrorKind::Network`] and [`ErrorKind::Auth`] failures qualify as the
//! fallback error of an aggregation call; other per-source outcomes are
//! absorbed.
//!
//! # Examples
//!
//! ```
//! use savvy_shopper::domain::errors::{ErrorKind, SearchError};
//!
//! let error = SearchError::timeout("search timed out");
//! assert_eq!(error.kind(), ErrorKind::Network);
//! assert!(error.is_qualifying());
//!
//! let error = SearchError::unavailable("nothing indexed for this term");
//! assert!(!error.is_qualifying());
//! ```

use crate::domain::value_objects::Retailer;
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport, backend, timeout or data-integrity failure.
    Network,
    /// Credential rejected or missing.
    Auth,
    /// No source produced any offer.
    NoResults,
    /// Anything else (adapter-specific outcomes, bad input).
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "NETWORK"),
            Self::Auth => write!(f, "AUTH"),
            Self::NoResults => write!(f, "NO_RESULTS"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// Error type for search and aggregation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Transport or backend failure.
    #[error("network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// A deadline elapsed before the operation finished.
    #[error("network error: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// The deadline that elapsed, in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// The caller cancelled the operation.
    #[error("network error: {message}")]
    Cancelled {
        /// Error message.
        message: String,
    },

    /// Data received from a backend violated an invariant.
    #[error("network error: {message}")]
    Integrity {
        /// Error message.
        message: String,
    },

    /// The backend rejected the credential, or none was supplied.
    #[error("authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// No source produced any offer.
    #[error("no offers found")]
    NoResults,

    /// Adapter-specific outcome that does not indicate an infrastructure problem.
    #[error("source unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },

    /// The query cannot be searched.
    #[error("invalid query: {message}")]
    InvalidQuery {
        /// Error message.
        message: String,
    },

    /// A searcher task ended without reporting.
    #[error("searcher for {retailer} failed: {message}")]
    Aborted {
        /// The retailer whose searcher aborted.
        retailer: Retailer,
        /// Error message.
        message: String,
    },
}

impl SearchError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Creates a data-integrity error.
    #[must_use]
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates an adapter-specific unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates an invalid query error.
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates an aborted searcher error.
    #[must_use]
    pub fn aborted(retailer: Retailer, message: impl Into<String>) -> Self {
        Self::Aborted {
            retailer,
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::Cancelled { .. }
            | Self::Integrity { .. } => ErrorKind::Network,
            Self::Authentication { .. } => ErrorKind::Auth,
            Self::NoResults => ErrorKind::NoResults,
            Self::Unavailable { .. } | Self::InvalidQuery { .. } | Self::Aborted { .. } => {
                ErrorKind::Other
            }
        }
    }

    /// Returns true if this failure may be reported when every source comes back empty.
    #[must_use]
    pub fn is_qualifying(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::Auth)
    }

    /// Returns true if this error is transient and a retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Returns the timeout duration in milliseconds, if applicable.
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
