//! # Search Context
//!
//! A cancellable deadline shared by every participant of one search call.
//!
//! A [`SearchContext`] combines an optional deadline with a
//! [`CancellationToken`]. Child contexts inherit cancellation from their
//! parent and never outlive the parent's deadline, so cancelling the caller's
//! context stops every searcher derived from it.
//!
//! # Examples
//!
//! ```
//! use savvy_shopper::domain::context::SearchContext;
//! use std::time::Duration;
//!
//! let parent = SearchContext::background();
//! let child = parent.child_with_timeout(Duration::from_secs(2));
//!
//! parent.cancel();
//! assert!(child.is_cancelled());
//! ```

use crate::domain::errors::{SearchError, SearchResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::{CancellationToken, DropGuard};

/// Cancellable deadline passed to searchers.
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// When the context expires, if ever.
    deadline: Option<Instant>,
    /// Cancellation shared with derived contexts.
    token: CancellationToken,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::background()
    }
}

impl SearchContext {
    /// Creates a root context with no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
        }
    }

    /// Creates a root context that expires after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            token: CancellationToken::new(),
        }
    }

    /// Derives a child context bounded by `timeout` and by this context's deadline.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };
        Self {
            deadline: Some(deadline),
            token: self.token.child_token(),
        }
    }

    /// Returns the deadline, if any.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the time left before the deadline, if any.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true if this context, or an ancestor, was cancelled.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns true if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns true once the context is cancelled or expired.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }

    /// Returns a guard that cancels this context when dropped.
    #[must_use]
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// Resolves once the context is cancelled or its deadline elapses.
    ///
    /// The returned error describes which of the two happened.
    pub async fn done(&self) -> SearchError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => SearchError::cancelled("search cancelled"),
                _ = sleep_until(deadline) => SearchError::timeout("deadline exceeded"),
            },
            None => {
                self.token.cancelled().await;
                SearchError::cancelled("search cancelled")
            }
        }
    }

    /// Drives `future` until it completes or the context is done.
    ///
    /// # Errors
    ///
    /// Returns the future's own error, or a timeout/cancellation error if the
    /// context finished first.
    pub async fn run<F, T>(&self, future: F) -> SearchResult<T>
    where
        F: Future<Output = SearchResult<T>>,
    {
        tokio::select! {
            reason = self.done() => Err(reason),
            result = future => result,
        }
    }
}
