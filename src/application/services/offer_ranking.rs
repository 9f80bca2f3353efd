//! # Offer Ranking
//!
//! Post-collection processing of the merged offer pool.
//!
//! Everything here is a pure function of the collected data, so ordering,
//! capping and validation can be tested without any concurrency.

use crate::domain::entities::Offer;
use crate::domain::errors::{SearchError, SearchResult};

/// Orders the pool by ascending price, keeps the `global_cap` cheapest and
/// rejects the result if any survivor has a negative price.
///
/// The sort is stable: offers with equal prices keep their arrival order.
///
/// # Errors
///
/// Returns `SearchError::Integrity` if a surviving offer has a negative price.
pub fn rank_offers(mut pool: Vec<Offer>, global_cap: usize) -> SearchResult<Vec<Offer>> {
    pool.sort_by_key(Offer::price);
    pool.truncate(global_cap);

    if let Some(offer) = pool.iter().find(|offer| offer.price().is_negative()) {
        return Err(SearchError::integrity(format!(
            "negative price found: {}",
            offer
        )));
    }

    Ok(pool)
}

/// Turns a finished collection into the call's result.
///
/// An empty pool reports `first_failure` when one was recorded and
/// `SearchError::NoResults` otherwise; a non-empty pool is ranked with
/// [`rank_offers`].
///
/// # Errors
///
/// Returns the recorded failure, `SearchError::NoResults`, or the ranking error.
pub fn settle(
    pool: Vec<Offer>,
    first_failure: Option<SearchError>,
    global_cap: usize,
) -> SearchResult<Vec<Offer>> {
    if pool.is_empty() {
        return Err(first_failure.unwrap_or(SearchError::NoResults));
    }
    rank_offers(pool, global_cap)
}
