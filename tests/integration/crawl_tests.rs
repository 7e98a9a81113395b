//! Integration tests for crawling and indexing
//!
//! These tests use wiremock to create mock HTTP servers and drive the
//! engine's indexing operations end-to-end.

use crate::{create_test_config, html_page};
use mawrid_search::crawler::Coordinator;
use mawrid_search::SearchEngine;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bulk_index_skips_failed_urls() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(html_page("First", "<p>first page</p>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(html_page("Second", "<p>second page</p>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let engine = SearchEngine::new(&create_test_config(5, 0)).unwrap();
    let urls = vec![
        format!("{}/first", base_url),
        format!("{}/missing", base_url),
        format!("{}/second", base_url),
    ];

    assert_eq!(engine.bulk_index(&urls).await, 2);

    let index = engine.index();
    assert_eq!(index.len().unwrap(), 2);
    assert!(index.get(&urls[0]).unwrap().is_some());
    assert!(index.get(&urls[1]).unwrap().is_none());
    assert!(index.get(&urls[2]).unwrap().is_some());
}

#[tokio::test]
async fn test_indexed_page_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(html_page(
            "Borrow Checker",
            r#"<nav>skip me</nav><p>Ownership and   borrowing.</p><a href="/next">next</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = SearchEngine::new(&create_test_config(5, 0)).unwrap();
    let url = format!("{}/article", mock_server.uri());

    assert!(engine.index_url(&url).await);

    let page = engine.index().get(&url).unwrap().unwrap();
    assert_eq!(page.url, url);
    assert_eq!(page.title, "Borrow Checker");
    assert!(page.content.contains("Ownership and borrowing."));
    assert!(!page.content.contains("skip me"));
    assert_eq!(page.links, vec![format!("{}/next", mock_server.uri())]);
    assert_eq!(page.domain, "127.0.0.1");
    assert_eq!(page.metadata.status_code, 200);
    assert_eq!(page.metadata.content_type, "text/html; charset=utf-8");
    assert_eq!(page.metadata.crawl_depth, 0);
}

#[tokio::test]
async fn test_reindexing_same_url_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(html_page("Once", "<p>once</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = SearchEngine::new(&create_test_config(5, 0)).unwrap();
    let url = format!("{}/once", mock_server.uri());

    assert!(engine.index_url(&url).await);
    assert!(!engine.index_url(&url).await);
    assert_eq!(engine.index().len().unwrap(), 1);
}

#[tokio::test]
async fn test_paced_crawl_timing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("Page", "<p>body</p>").set_delay(Duration::from_millis(200)))
        .expect(5)
        .mount(&mock_server)
        .await;

    let config = create_test_config(2, 200);
    let coordinator = Coordinator::new(&config).unwrap();
    let urls: Vec<String> = (0..5)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();

    let start = Instant::now();
    let pages = coordinator.crawl(&urls, 2).await;
    let elapsed = start.elapsed();

    assert_eq!(pages.len(), 5);
    // Three rounds on the busiest worker; serial fetching would take ~2s
    assert!(elapsed >= Duration::from_millis(550), "too fast: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(1200), "too slow: {:?}", elapsed);
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("Page", "<p>body</p>").set_delay(Duration::from_millis(300)))
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(&create_test_config(2, 0)).unwrap();
    let urls: Vec<String> = (0..4)
        .map(|i| format!("{}/p{}", mock_server.uri(), i))
        .collect();

    let start = Instant::now();
    let pages = coordinator.crawl(&urls, 2).await;

    assert_eq!(pages.len(), 4);
    assert!(start.elapsed() >= Duration::from_millis(580));
}

#[tokio::test]
async fn test_discover_indexes_linked_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Hub",
            &format!(
                r#"<a href="{0}/a">a</a><a href="{0}/b">b</a><a href="mailto:x@y.z">mail</a>"#,
                base_url
            ),
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page("A", "<p>leaf a</p>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let engine = SearchEngine::new(&create_test_config(4, 0)).unwrap();
    let report = engine
        .discover(&[format!("{}/", base_url)], 100)
        .await
        .unwrap();

    assert_eq!(
        report.urls,
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
        ]
    );
    assert_eq!(report.indexed, 2);
    assert_eq!(engine.index().len().unwrap(), 2);
}
