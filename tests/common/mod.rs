//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use savvy_shopper::domain::context::SearchContext;
use savvy_shopper::domain::entities::Offer;
use savvy_shopper::domain::errors::{SearchError, SearchResult};
use savvy_shopper::domain::value_objects::{Price, Retailer};
use savvy_shopper::infrastructure::retailers::{RetailerRegistry, RetailerSearcher};
use std::sync::Arc;
use std::time::Duration;

/// Searcher replaying a fixed outcome after an optional delay.
#[derive(Debug, Clone)]
pub struct ScriptedSearcher {
    pub retailer: Retailer,
    pub outcome: SearchResult<Vec<Offer>>,
    pub delay: Duration,
}

impl ScriptedSearcher {
    pub fn offers(retailer: Retailer, priced: &[(&str, i64)]) -> Self {
        let offers = priced
            .iter()
            .map(|(title, cents)| {
                Offer::new(*title, Price::from_cents(*cents), format!("https://example.com/{title}"))
            })
            .collect();
        Self {
            retailer,
            outcome: Ok(offers),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(retailer: Retailer, error: SearchError) -> Self {
        Self {
            retailer,
            outcome: Err(error),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl RetailerSearcher for ScriptedSearcher {
    fn retailer(&self) -> Retailer {
        self.retailer
    }

    async fn search(&self, _query: &str, ctx: &SearchContext) -> SearchResult<Vec<Offer>> {
        let outcome = self.outcome.clone();
        let delay = self.delay;
        ctx.run(async move {
            tokio::time::sleep(delay).await;
            outcome
        })
        .await
    }
}

pub fn registry(searchers: Vec<ScriptedSearcher>) -> RetailerRegistry {
    searchers
        .into_iter()
        .map(|s| (s.retailer, Arc::new(s) as Arc<dyn RetailerSearcher>))
        .collect()
}

pub fn titles(offers: &[Offer]) -> Vec<&str> {
    offers.iter().map(Offer::title).collect()
}
