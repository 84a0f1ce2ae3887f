//! Integration tests for the collection pipeline
//!
//! These tests use wiremock to stand in for the remote search API and a
//! temporary directory for the page store, exercising the full
//! fetch→store→resume cycle end-to-end.

use review_harvest::config::{ApiConfig, CollectionConfig, RateLimitConfig};
use review_harvest::{CollectionTarget, Collector, JsonPageStore, PageStore, SerpApiFetcher};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_api_config(endpoint: &str) -> ApiConfig {
    ApiConfig {
        key: "test-key".to_string(),
        endpoint: endpoint.to_string(),
        language: "zh-TW".to_string(),
        timeout_secs: 5,
    }
}

fn test_rate_limit(max_retries: u32) -> RateLimitConfig {
    RateLimitConfig {
        // No delays: the tests only care about request counts and ordering
        request_delay_min: 0.0,
        request_delay_max: 0.0,
        max_retries,
        retry_delay: 0.0,
    }
}

fn test_collection_config() -> CollectionConfig {
    CollectionConfig {
        max_pages: 50,
        reviews_per_page: 20,
        pages_per_run: 10,
    }
}

fn test_target() -> CollectionTarget {
    CollectionTarget {
        name: "Test Night Market".to_string(),
        data_id: "test-data-id".to_string(),
        slug: "test".to_string(),
    }
}

fn page_body(review_count: usize, token: Option<&str>) -> serde_json::Value {
    let reviews: Vec<_> = (0..review_count)
        .map(|i| {
            json!({
                "rating": 4.0,
                "snippet": format!("review number {}", i),
                "date": "a week ago"
            })
        })
        .collect();
    match token {
        Some(t) => json!({
            "reviews": reviews,
            "serpapi_pagination": { "next_page_token": t }
        }),
        None => json!({ "reviews": reviews }),
    }
}

fn build_collector(
    server_uri: &str,
    store: JsonPageStore,
    max_retries: u32,
) -> Collector<SerpApiFetcher, JsonPageStore> {
    let endpoint = format!("{}/search.json", server_uri);
    let fetcher = SerpApiFetcher::new(test_api_config(&endpoint), test_rate_limit(max_retries))
        .expect("failed to build fetcher");
    Collector::new(fetcher, store, test_collection_config())
}

#[tokio::test]
async fn test_fresh_run_follows_token_until_exhausted() {
    let mock_server = MockServer::start().await;

    // Page 2: requested with page 1's token; no token in the response
    Mock::given(method("GET"))
        .and(query_param("next_page_token", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 1: the token-less first request of the stream
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, Some("A"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();
    let collector = build_collector(&mock_server.uri(), store.clone(), 3);

    let stats = collector.collect(&test_target(), 1, 2).await;

    // The run ended because the token was exhausted, not the budget
    assert_eq!(stats.total_pages_requested, 2);
    assert_eq!(stats.successful_pages, 2);
    assert_eq!(stats.failed_pages, 0);
    assert_eq!(stats.total_reviews_collected, 5);
    assert_eq!(stats.saved_files.len(), 2);

    assert_eq!(store.list_existing_pages(), vec![1, 2]);
    assert_eq!(store.read(1).unwrap().review_count(), 3);
    assert_eq!(store.read(2).unwrap().review_count(), 2);
}

#[tokio::test]
async fn test_second_run_is_idempotent_with_zero_network_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("next_page_token", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, None)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, Some("A"))))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();

    let collector = build_collector(&mock_server.uri(), store.clone(), 3);
    let first = collector.collect(&test_target(), 1, 2).await;
    assert_eq!(first.successful_pages, 2);
    drop(collector);

    // Second run against a server that rejects every request: all pages
    // must be answered from disk
    let strict_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&strict_server)
        .await;

    let collector = build_collector(&strict_server.uri(), store, 3);
    let second = collector.collect(&test_target(), 1, 2).await;

    assert_eq!(second.total_pages_requested, 2);
    assert_eq!(second.successful_pages, 2);
    assert_eq!(second.failed_pages, 0);
    assert_eq!(second.total_reviews_collected, 5);
    // Nothing was written this time
    assert!(second.saved_files.is_empty());
}

#[tokio::test]
async fn test_preseeded_store_fetches_only_the_gap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(4, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();

    // Pages 1 and 2 were collected by an earlier run
    for n in [1u32, 2] {
        let page = serde_json::from_value(page_body(8, Some("old-token"))).unwrap();
        store.save(n, &page).unwrap();
    }

    let existing = store.list_existing_pages();
    let start = review_harvest::next_missing_page(&existing);
    assert_eq!(start, 3);

    let collector = build_collector(&mock_server.uri(), store.clone(), 3);
    let stats = collector.collect(&test_target(), start, 2).await;

    // One fetch for page 3, terminal; pages 1 and 2 untouched
    assert_eq!(stats.total_pages_requested, 1);
    assert_eq!(stats.successful_pages, 1);
    assert_eq!(store.list_existing_pages(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_retry_exhaustion_hits_server_exactly_max_retries_times() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();
    let collector = build_collector(&mock_server.uri(), store.clone(), 3);

    let stats = collector.collect(&test_target(), 1, 1).await;

    assert_eq!(stats.total_pages_requested, 1);
    assert_eq!(stats.successful_pages, 0);
    assert_eq!(stats.failed_pages, 1);
    assert!(store.list_existing_pages().is_empty());

    // .expect(3) is verified when mock_server drops
}

#[tokio::test]
async fn test_failed_page_does_not_abort_the_run() {
    let mock_server = MockServer::start().await;

    // First page fails outright; the next visited page succeeds and ends
    // the stream
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(6, None)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();
    // max_retries = 1 so the first page fails on its single attempt
    let collector = build_collector(&mock_server.uri(), store.clone(), 1);

    let stats = collector.collect(&test_target(), 1, 2).await;

    assert_eq!(stats.total_pages_requested, 2);
    assert_eq!(stats.failed_pages, 1);
    assert_eq!(stats.successful_pages, 1);
    // The failed page 1 stays missing for the next run's gap finder
    assert_eq!(store.list_existing_pages(), vec![2]);
    assert_eq!(review_harvest::next_missing_page(&[2]), 1);
}

#[tokio::test]
async fn test_service_error_payload_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": "Google Maps Reviews returned no results" })),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();
    let collector = build_collector(&mock_server.uri(), store.clone(), 2);

    let stats = collector.collect(&test_target(), 1, 1).await;

    assert_eq!(stats.failed_pages, 1);
    assert!(store.list_existing_pages().is_empty());
}

#[tokio::test]
async fn test_request_carries_expected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("engine", "google_maps_reviews"))
        .and(query_param("data_id", "test-data-id"))
        .and(query_param("hl", "zh-TW"))
        .and(query_param("sort_by", "newestFirst"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonPageStore::new(dir.path(), "test").unwrap();
    let collector = build_collector(&mock_server.uri(), store, 1);

    let stats = collector.collect(&test_target(), 1, 1).await;
    assert_eq!(stats.successful_pages, 1);
}
