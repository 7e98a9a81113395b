//! Integration tests for the query pipeline

use crate::{create_test_config, html_page};
use mawrid_search::search::{SUMMARY_UNAVAILABLE, TITLE_WEIGHT};
use mawrid_search::{SearchEngine, SearchQuery};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

/// An engine whose query-triggered crawls hit the given URLs
fn engine_with_candidates(crawl_threshold: usize, candidates: Vec<String>) -> SearchEngine {
    let mut config = create_test_config(4, 0);
    config.search.crawl_threshold = crawl_threshold;

    SearchEngine::new(&config)
        .unwrap()
        .with_candidate_source(Arc::new(move |_: &str| candidates.clone()))
}

#[tokio::test]
async fn test_search_scores_indexed_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/python"))
        .respond_with(html_page(
            "Python Tutorial",
            "<p>Python is a programming language</p>",
        ))
        .mount(&mock_server)
        .await;

    let engine = engine_with_candidates(1, vec![]);
    let url = format!("{}/python", mock_server.uri());
    assert!(engine.index_url(&url).await);

    let response = engine
        .search(SearchQuery::new("python programming").unwrap())
        .await;

    assert_eq!(response.query, "python programming");
    assert_eq!(response.total_results, 1);
    let hit = &response.results[0];
    assert_eq!(hit.url, url);
    // python: title + content, programming: content only
    assert_eq!(hit.score, TITLE_WEIGHT + 2);
    assert!(hit.snippet.contains("Python is a programming language"));
    assert!(response.processing_time >= 0.0);
    assert!(response.ai_summary.unwrap().contains("Python Tutorial"));
}

#[tokio::test]
async fn test_equal_scores_keep_index_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    for (route, title) in [("/a", "Other"), ("/b", "Tokio"), ("/c", "Another"), ("/d", "Tokio")] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page(title, "<p>tokio runtime</p>"))
            .mount(&mock_server)
            .await;
    }

    let engine = engine_with_candidates(1, vec![]);
    let urls: Vec<String> = ["/a", "/b", "/c", "/d"]
        .iter()
        .map(|route| format!("{}{}", base_url, route))
        .collect();
    assert_eq!(engine.bulk_index(&urls).await, 4);

    let response = engine.search(SearchQuery::new("tokio").unwrap()).await;

    let order: Vec<&str> = response.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        order,
        vec![urls[1].as_str(), urls[3].as_str(), urls[0].as_str(), urls[2].as_str()]
    );
}

#[tokio::test]
async fn test_sparse_index_triggers_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/ferris"))
        .respond_with(html_page("Ferris", "<p>Ferris the crab is the Rust mascot</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dictionary/ferris"))
        .respond_with(html_page("Dictionary", "<p>no relevant words</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_with_candidates(
        5,
        vec![
            format!("{}/wiki/ferris", base_url),
            format!("{}/dictionary/ferris", base_url),
        ],
    );

    let response = engine.search(SearchQuery::new("Ferris").unwrap()).await;

    assert_eq!(response.total_results, 1);
    assert_eq!(response.results[0].title, "Ferris");
    // both candidates are indexed, matching or not
    assert_eq!(engine.index().len().unwrap(), 2);
    assert_eq!(response.suggestions.len(), 5);
}

#[tokio::test]
async fn test_no_matches_is_well_formed() {
    let engine = engine_with_candidates(5, vec![]);

    let response = engine
        .search(SearchQuery::new("nothing indexed").unwrap())
        .await;

    assert!(response.results.is_empty());
    assert_eq!(response.total_results, 0);
    assert_eq!(response.ai_summary.as_deref(), Some(SUMMARY_UNAVAILABLE));
    assert_eq!(engine.stats().unwrap().total_searches, 1);
}

#[tokio::test]
async fn test_response_serializes_to_json() {
    let engine = engine_with_candidates(5, vec![]);
    let response = engine.search(SearchQuery::new("json").unwrap()).await;

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["query"], "json");
    assert_eq!(value["total_results"], 0);
    assert!(value["results"].is_array());
    assert!(value["processing_time"].is_number());
    assert!(value["suggestions"].is_array());
}
