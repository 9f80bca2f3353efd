//! # Retailer Searcher Trait
//!
//! Port definition for retailer search integrations.
//!
//! This module defines the [`RetailerSearcher`] trait that every retailer
//! backend implements, and the [`RetailerRegistry`] mapping retailers to
//! their searchers.
//!
//! # Examples
//!
//! ```ignore
//! use savvy_shopper::infrastructure::retailers::traits::RetailerSearcher;
//!
//! struct MySearcher { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl RetailerSearcher for MySearcher {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::context::SearchContext;
use crate::domain::entities::Offer;
use crate::domain::errors::SearchResult;
use crate::domain::value_objects::Retailer;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Searches one retailer's catalogue.
///
/// Implementations must:
/// - return promptly once `ctx` is cancelled or its deadline passes,
/// - return at most a handful of offers (the engine caps them again),
/// - report failures as classified [`SearchError`](crate::domain::errors::SearchError)s.
///
/// Any retry policy is local to the implementation; callers never retry.
#[async_trait]
pub trait RetailerSearcher: Send + Sync + fmt::Debug {
    /// Returns the retailer this searcher serves.
    fn retailer(&self) -> Retailer;

    /// Searches for `query`, honouring the context's deadline and cancellation.
    ///
    /// # Errors
    ///
    /// Returns a classified error when the backend cannot be reached, rejects
    /// the credential, or has nothing to offer.
    async fn search(&self, query: &str, ctx: &SearchContext) -> SearchResult<Vec<Offer>>;
}

/// Read-only mapping from retailer to searcher.
///
/// Cloning is cheap; the registry can be shared by concurrent aggregation calls.
#[derive(Debug, Clone, Default)]
pub struct RetailerRegistry {
    searchers: BTreeMap<Retailer, Arc<dyn RetailerSearcher>>,
}

impl RetailerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `searcher` for `retailer`, returning the searcher it replaced.
    pub fn insert(
        &mut self,
        retailer: Retailer,
        searcher: Arc<dyn RetailerSearcher>,
    ) -> Option<Arc<dyn RetailerSearcher>> {
        self.searchers.insert(retailer, searcher)
    }

    /// Registers `searcher` under its own retailer.
    #[must_use]
    pub fn with(mut self, searcher: Arc<dyn RetailerSearcher>) -> Self {
        self.searchers.insert(searcher.retailer(), searcher);
        self
    }

    /// Returns the searcher for `retailer`.
    #[must_use]
    pub fn get(&self, retailer: Retailer) -> Option<&Arc<dyn RetailerSearcher>> {
        self.searchers.get(&retailer)
    }

    /// Returns the registered retailers.
    pub fn retailers(&self) -> impl Iterator<Item = Retailer> + '_ {
        self.searchers.keys().copied()
    }

    /// Iterates over the registered searchers.
    pub fn iter(&self) -> impl Iterator<Item = (Retailer, &Arc<dyn RetailerSearcher>)> {
        self.searchers.iter().map(|(retailer, searcher)| (*retailer, searcher))
    }

    /// Returns the number of registered searchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    /// Returns true if no searcher is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }
}

impl FromIterator<(Retailer, Arc<dyn RetailerSearcher>)> for RetailerRegistry {
    fn from_iter<I: IntoIterator<Item = (Retailer, Arc<dyn RetailerSearcher>)>>(iter: I) -> Self {
        Self {
            searchers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NullSearcher(Retailer);

    #[async_trait]
    impl RetailerSearcher for NullSearcher {
        fn retailer(&self) -> Retailer {
            self.0
        }

        async fn search(&self, _query: &str, _ctx: &SearchContext) -> SearchResult<Vec<Offer>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn with_registers_under_own_retailer() {
        let registry = RetailerRegistry::new()
            .with(Arc::new(NullSearcher(Retailer::Walmart)))
            .with(Arc::new(NullSearcher(Retailer::Amazon)));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.retailers().collect::<Vec<_>>(),
            vec![Retailer::Amazon, Retailer::Walmart]
        );
        assert_eq!(
            registry.get(Retailer::Walmart).unwrap().retailer(),
            Retailer::Walmart
        );
    }

    #[test]
    fn keys_are_unique() {
        let mut registry = RetailerRegistry::new();
        assert!(
            registry
                .insert(Retailer::Amazon, Arc::new(NullSearcher(Retailer::Amazon)))
                .is_none()
        );
        assert!(
            registry
                .insert(Retailer::Amazon, Arc::new(NullSearcher(Retailer::Amazon)))
                .is_some()
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn collects_from_pairs() {
        let registry: RetailerRegistry = Retailer::ALL
            .into_iter()
            .map(|r| (r, Arc::new(NullSearcher(r)) as Arc<dyn RetailerSearcher>))
            .collect();
        assert_eq!(registry.len(), Retailer::ALL.len());
        assert!(!registry.is_empty());
        assert!(RetailerRegistry::new().is_empty());
    }
}
