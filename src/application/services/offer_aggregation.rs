//! # Offer Aggregation Engine
//!
//! Concurrent search across retailers with merge, ranking and validation.
//!
//! This module provides the [`OfferAggregationEngine`], which runs every
//! registered [`RetailerSearcher`] in parallel under one shared deadline,
//! collects the reports in completion order and hands the merged pool to
//! [`settle`](super::offer_ranking::settle).
//!
//! Per call the engine moves through [`CallState`]:
//!
//! ```text
//! Pending → FanOut → DeadlineExceeded            (error)
//!                  → Collected → Validated       (offers)
//!                              → Failed          (error)
//! ```

use crate::application::services::offer_ranking::settle;
use crate::domain::context::SearchContext;
use crate::domain::entities::Offer;
use crate::domain::errors::{SearchError, SearchResult};
use crate::domain::value_objects::Retailer;
use crate::infrastructure::retailers::traits::{RetailerRegistry, RetailerSearcher};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default overall timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Default maximum offers taken from one retailer.
pub const DEFAULT_PER_SOURCE_CAP: usize = 3;

/// Default maximum offers returned by a call.
pub const DEFAULT_GLOBAL_CAP: usize = 6;

/// Configuration for offer aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Overall timeout for the whole fan-out in milliseconds.
    pub timeout_ms: u64,
    /// Maximum offers kept from a single retailer.
    pub per_source_cap: usize,
    /// Maximum offers returned.
    pub global_cap: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            per_source_cap: DEFAULT_PER_SOURCE_CAP,
            global_cap: DEFAULT_GLOBAL_CAP,
        }
    }
}

impl AggregationConfig {
    /// Creates a new configuration with the specified overall timeout.
    #[must_use]
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            ..Default::default()
        }
    }

    /// Sets the per-retailer cap.
    #[must_use]
    pub fn with_per_source_cap(mut self, cap: usize) -> Self {
        self.per_source_cap = cap;
        self
    }

    /// Sets the global cap.
    #[must_use]
    pub fn with_global_cap(mut self, cap: usize) -> Self {
        self.global_cap = cap;
        self
    }

    /// Returns the overall timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Lifecycle of one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallState {
    /// Call accepted, nothing launched yet.
    Pending,
    /// Searchers running.
    FanOut,
    /// The shared deadline elapsed (or the caller cancelled) before every searcher reported.
    DeadlineExceeded,
    /// Every searcher reported.
    Collected,
    /// Offers ranked and validated.
    Validated,
    /// The collected pool could not produce a result.
    Failed,
}

impl CallState {
    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::DeadlineExceeded | Self::Validated | Self::Failed
        )
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::FanOut => write!(f, "FAN_OUT"),
            Self::DeadlineExceeded => write!(f, "DEADLINE_EXCEEDED"),
            Self::Collected => write!(f, "COLLECTED"),
            Self::Validated => write!(f, "VALIDATED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// The single message each searcher task sends back.
#[derive(Debug)]
struct SearcherReport {
    retailer: Retailer,
    outcome: SearchResult<Vec<Offer>>,
}

/// Accumulated state of the collection phase.
#[derive(Debug, Default)]
struct Collection {
    pool: Vec<Offer>,
    first_failure: Option<SearchError>,
    reported: usize,
}

impl Collection {
    /// Folds one report into the pool.
    fn absorb(&mut self, report: SearcherReport, per_source_cap: usize) {
        self.reported += 1;
        let SearcherReport { retailer, outcome } = report;

        match outcome {
            Ok(offers) => {
                if offers.len() > per_source_cap {
                    tracing::debug!(
                        retailer = %retailer,
                        returned = offers.len(),
                        cap = per_source_cap,
                        "searcher exceeded per-source cap, truncating"
                    );
                }
                self.pool.extend(
                    offers
                        .into_iter()
                        .take(per_source_cap)
                        .map(|offer| offer.with_retailer(retailer)),
                );
            }
            Err(error) => {
                tracing::warn!(retailer = %retailer, error = %error, "searcher failed");
                if error.is_qualifying() && self.first_failure.is_none() {
                    self.first_failure = Some(error);
                }
            }
        }
    }
}

/// Engine searching all registered retailers for the cheapest offers.
///
/// The engine holds no per-call state; one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct OfferAggregationEngine {
    registry: RetailerRegistry,
    config: AggregationConfig,
}

impl OfferAggregationEngine {
    /// Creates a new OfferAggregationEngine.
    #[must_use]
    pub fn new(registry: RetailerRegistry, config: AggregationConfig) -> Self {
        Self { registry, config }
    }

    /// Creates a new engine with default configuration.
    #[must_use]
    pub fn with_defaults(registry: RetailerRegistry) -> Self {
        Self::new(registry, AggregationConfig::default())
    }

    /// Searches every registered retailer and returns the cheapest offers.
    ///
    /// # Errors
    ///
    /// See [`aggregate_with_context`](Self::aggregate_with_context).
    pub async fn aggregate(&self, query: &str) -> SearchResult<Vec<Offer>> {
        self.aggregate_with_context(query, &SearchContext::background())
            .await
    }

    /// Searches every registered retailer under a deadline derived from `parent`.
    ///
    /// The call's deadline is the configured timeout, shortened to the
    /// parent's deadline if that comes first; cancelling `parent` ends the
    /// call. Searchers still running when the call returns are signalled to
    /// stop and their late results are discarded.
    ///
    /// # Returns
    ///
    /// At most `global_cap` offers sorted by ascending price, each tagged
    /// with its retailer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the query is blank (`InvalidQuery`)
    /// - the deadline elapses or `parent` is cancelled before every searcher reports (`Timeout`/`Cancelled`)
    /// - no offer was found: the first network or authentication failure, else `NoResults`
    /// - a surviving offer has a negative price (`Integrity`)
    pub async fn aggregate_with_context(
        &self,
        query: &str,
        parent: &SearchContext,
    ) -> SearchResult<Vec<Offer>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::invalid_query("query must not be empty"));
        }

        let budget_ms = self.budget_ms(parent);
        let ctx = parent.child_with_timeout(self.config.timeout());
        let _stop_searchers = ctx.drop_guard();

        tracing::debug!(
            query,
            state = %CallState::Pending,
            searchers = self.registry.len(),
            timeout_ms = budget_ms,
            "starting aggregation"
        );

        let collection = match self.collect(query, &ctx, budget_ms).await {
            Ok(collection) => collection,
            Err(error) => {
                tracing::warn!(state = %CallState::DeadlineExceeded, error = %error, "aggregation aborted");
                return Err(error);
            }
        };

        tracing::debug!(
            state = %CallState::Collected,
            reported = collection.reported,
            pooled = collection.pool.len(),
            "all searchers reported"
        );

        let result = settle(
            collection.pool,
            collection.first_failure,
            self.config.global_cap,
        );

        match &result {
            Ok(offers) => {
                tracing::info!(state = %CallState::Validated, offers = offers.len(), "aggregation complete");
            }
            Err(error) => {
                tracing::info!(state = %CallState::Failed, error = %error, "aggregation failed");
            }
        }

        result
    }

    /// Launches every searcher and gathers reports until all arrive or `ctx` is done.
    ///
    /// A report that arrives together with the deadline never turns the call
    /// into a success: once `ctx` is done the collection is discarded.
    async fn collect(
        &self,
        query: &str,
        ctx: &SearchContext,
        budget_ms: u64,
    ) -> SearchResult<Collection> {
        let (tx, mut rx) = mpsc::channel(self.registry.len().max(1));

        tracing::debug!(state = %CallState::FanOut, "launching searchers");
        for (retailer, searcher) in self.registry.iter() {
            spawn_searcher(
                retailer,
                Arc::clone(searcher),
                query.to_owned(),
                ctx.clone(),
                tx.clone(),
            );
        }
        drop(tx);

        let mut collection = Collection::default();
        loop {
            tokio::select! {
                biased;
                reason = ctx.done() => return Err(deadline_error(reason, budget_ms)),
                report = rx.recv() => match report {
                    Some(report) => collection.absorb(report, self.config.per_source_cap),
                    None => break,
                },
            }
        }

        if ctx.is_done() {
            return Err(deadline_error(ctx.done().await, budget_ms));
        }

        Ok(collection)
    }

    /// Returns the time budget of a call made under `parent`, in milliseconds.
    ///
    /// This is the configured timeout unless the parent's deadline is sooner.
    fn budget_ms(&self, parent: &SearchContext) -> u64 {
        match parent.remaining() {
            Some(left) if left < self.config.timeout() => {
                u64::try_from(left.as_millis()).unwrap_or(u64::MAX)
            }
            _ => self.config.timeout_ms,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Returns the searcher registry.
    #[must_use]
    pub fn registry(&self) -> &RetailerRegistry {
        &self.registry
    }
}

/// Maps the reason a context finished to the call's error.
fn deadline_error(reason: SearchError, budget_ms: u64) -> SearchError {
    match reason {
        SearchError::Timeout { .. } => {
            SearchError::timeout_with_duration("search timed out", budget_ms)
        }
        other => other,
    }
}

/// Runs one searcher on its own task; the task sends exactly one report.
fn spawn_searcher(
    retailer: Retailer,
    searcher: Arc<dyn RetailerSearcher>,
    query: String,
    ctx: SearchContext,
    tx: mpsc::Sender<SearcherReport>,
) {
    tokio::spawn(async move {
        let outcome = AssertUnwindSafe(searcher.search(&query, &ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(SearchError::aborted(retailer, "searcher panicked")));

        if tx.send(SearcherReport { retailer, outcome }).await.is_err() {
            tracing::debug!(retailer = %retailer, "discarding late searcher report");
        }
    });
}
