//! # Retry Policy
//!
//! Bounded retry with exponential backoff for a single searcher call.
//!
//! The delay before retry `n` (counting from zero) is `base_delay * 2^n`.
//! Every attempt and every wait is bounded by the caller's
//! [`SearchContext`]; once it is done the policy gives up immediately.

use crate::domain::context::SearchContext;
use crate::domain::errors::SearchResult;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Default maximum number of attempts.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay in milliseconds.
const DEFAULT_BASE_DELAY_MS: u64 = 100;

/// Retry-with-backoff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and base delay.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new(1, 0)
    }

    /// Returns the delay to wait after failed attempt `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Runs `operation` until it succeeds, fails permanently, or the budget is spent.
    ///
    /// Only errors reporting [`is_retryable`](crate::domain::errors::SearchError::is_retryable)
    /// are retried.
    ///
    /// # Errors
    ///
    /// Returns the last error from `operation`, or the context's
    /// timeout/cancellation error if it finishes first.
    pub async fn run<F, Fut, T>(&self, ctx: &SearchContext, mut operation: F) -> SearchResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = SearchResult<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let error = match ctx.run(operation()).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            attempt += 1;
            if !error.is_retryable() || attempt >= attempts || ctx.is_done() {
                return Err(error);
            }

            let delay = self.delay_for(attempt - 1);
            tracing::debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying search request"
            );

            tokio::select! {
                reason = ctx.done() => return Err(reason),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::SearchError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn delays_grow_exponentially() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn huge_attempt_saturates() {
        let policy = RetryPolicy::new(3, 10);
        assert_eq!(policy.delay_for(80), Duration::from_millis(u64::MAX));
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let policy = RetryPolicy::new(3, 1);
        let calls = &AtomicU32::new(0);
        let ctx = SearchContext::with_timeout(Duration::from_secs(5));

        let result = policy
            .run(&ctx, || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(SearchError::network("connection reset"))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let policy = RetryPolicy::new(2, 1);
        let calls = &AtomicU32::new(0);
        let ctx = SearchContext::with_timeout(Duration::from_secs(5));

        let result: SearchResult<()> = policy
            .run(&ctx, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SearchError::network("down"))
            })
            .await;

        assert!(matches!(result, Err(SearchError::Network { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_authentication() {
        let policy = RetryPolicy::new(5, 1);
        let calls = &AtomicU32::new(0);
        let ctx = SearchContext::background();

        let result: SearchResult<()> = policy
            .run(&ctx, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SearchError::authentication("bad key"))
            })
            .await;

        assert!(matches!(result, Err(SearchError::Authentication { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn backoff_wait_is_cut_short_by_deadline() {
        let policy = RetryPolicy::new(3, 10_000);
        let ctx = SearchContext::with_timeout(Duration::from_millis(30));
        let started = tokio::time::Instant::now();

        let result: SearchResult<()> = policy
            .run(&ctx, || async { Err(SearchError::network("down")) })
            .await;

        assert!(matches!(result, Err(SearchError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
