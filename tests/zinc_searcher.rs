//! Zinc searcher against a mock HTTP backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use savvy_shopper::domain::context::SearchContext;
use savvy_shopper::domain::errors::{ErrorKind, SearchError};
use savvy_shopper::domain::value_objects::{Price, Retailer};
use savvy_shopper::infrastructure::config::ApiKey;
use savvy_shopper::infrastructure::retailers::{
    HttpClient, RetailerSearcher, RetryPolicy, ZincSearcher,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn searcher(server: &MockServer, retailer: Retailer) -> ZincSearcher {
    let endpoint = format!("{}/{}", server.uri(), retailer.slug());
    ZincSearcher::new(retailer, endpoint, HttpClient::new(2000).unwrap())
        .with_api_key(ApiKey::new("secret").unwrap())
        .with_retry(RetryPolicy::new(3, 1))
}

#[tokio::test]
async fn posts_query_and_parses_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/amazon"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Basic c2VjcmV0Og=="))
        .and(body_json(json!({
            "search_term": "usb cable",
            "retailer": "Amazon",
            "max_results": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Cable A", "price": 8.99, "url": "https://example.com/a"},
                {"title": "Cable B", "price": 12.5, "url": "https://example.com/b"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let offers = searcher(&server, Retailer::Amazon)
        .search("usb cable", &SearchContext::background())
        .await
        .unwrap();

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].title(), "Cable A");
    assert_eq!(offers[0].price(), Price::from_cents(899));
    assert_eq!(offers[0].url(), "https://example.com/a");
    assert_eq!(offers[1].retailer(), Some(Retailer::Amazon));
}

#[tokio::test]
async fn missing_results_field_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/walmart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let offers = searcher(&server, Retailer::Walmart)
        .search("anything", &SearchContext::background())
        .await
        .unwrap();

    assert!(offers.is_empty());
}

#[tokio::test]
async fn unauthorized_is_auth_failure_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let error = searcher(&server, Retailer::Amazon)
        .search("query", &SearchContext::background())
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Authentication { .. }));
    assert_eq!(error.kind(), ErrorKind::Auth);
}

#[tokio::test]
async fn server_error_is_retried_then_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let error = searcher(&server, Retailer::Walmart)
        .search("query", &SearchContext::background())
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Network { .. }));
    assert!(error.to_string().contains("unexpected status code"));
}

#[tokio::test]
async fn recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "Retry", "price": 1.0, "url": "u"}]
        })))
        .mount(&server)
        .await;

    let offers = searcher(&server, Retailer::Amazon)
        .search("query", &SearchContext::background())
        .await
        .unwrap();

    assert_eq!(offers[0].title(), "Retry");
}

#[tokio::test]
async fn malformed_body_is_integrity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let error = searcher(&server, Retailer::Amazon)
        .search("query", &SearchContext::background())
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Integrity { .. }));
    assert_eq!(error.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn deadline_stops_slow_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let ctx = SearchContext::with_timeout(Duration::from_millis(100));
    let error = searcher(&server, Retailer::Amazon)
        .search("query", &ctx)
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Timeout { .. }));
}
