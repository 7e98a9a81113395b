//! End-to-end tests against wiremock servers

mod crawl_tests;
mod search_tests;

use mawrid_search::config::{Config, CrawlerConfig, SearchConfig, UserAgentConfig};
use wiremock::ResponseTemplate;

/// Creates a test configuration with no crawl delay and short timeouts
pub fn create_test_config(max_concurrent: usize, crawl_delay_ms: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 2,
            max_concurrent,
            crawl_delay_ms,
            request_timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            value: "TestBot/1.0".to_string(),
        },
        search: SearchConfig {
            crawl_timeout_secs: 10,
            ..SearchConfig::default()
        },
    }
}

/// An HTML page with the given title and body markup
pub fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html; charset=utf-8")
}
