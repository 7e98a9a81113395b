use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Mawrid Search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub search: SearchConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from seed URLs
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once
    pub max_concurrent: usize,

    /// Minimum time between two fetches on the same worker (milliseconds)
    pub crawl_delay_ms: u64,

    /// Total per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Extracted page text is cut to this many characters
    pub max_content_chars: usize,

    /// Maximum number of outbound links kept per page
    pub max_links: usize,

    /// Frontier batch size during recursive discovery
    pub discovery_batch_size: usize,
}

impl CrawlerConfig {
    pub fn crawl_delay(&self) -> Duration {
        Duration::from_millis(self.crawl_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_concurrent: 10,
            crawl_delay_ms: 1000,
            request_timeout_secs: 30,
            max_content_chars: 5000,
            max_links: 50,
            discovery_batch_size: 50,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// The full User-Agent header sent with every request
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mawrid Search Engine Bot 1.0".to_string(),
        }
    }
}

/// Query orchestration configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Crawl candidate URLs when fewer indexed results than this match
    pub crawl_threshold: usize,

    /// Upper bound on candidate URLs crawled per query
    pub max_crawl_urls: usize,

    /// Page size used when the caller gives none
    pub default_limit: usize,

    /// Largest page size a caller may request
    pub max_limit: usize,

    /// Number of top results handed to the summarizer
    pub summary_results: usize,

    /// Number of suggestions kept from the suggestion generator
    pub max_suggestions: usize,

    /// Budget for a query-triggered crawl (seconds)
    pub crawl_timeout_secs: u64,

    /// Length of `content_preview` in results (characters)
    pub preview_chars: usize,
}

impl SearchConfig {
    pub fn crawl_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl_timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            crawl_threshold: 5,
            max_crawl_urls: 10,
            default_limit: 20,
            max_limit: 100,
            summary_results: 5,
            max_suggestions: 5,
            crawl_timeout_secs: 60,
            preview_chars: 500,
        }
    }
}
