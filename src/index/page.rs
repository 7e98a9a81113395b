use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fetch details recorded alongside a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    /// HTTP status code of the fetch
    pub status_code: u16,

    /// Content-Type header value (empty if absent)
    pub content_type: String,

    /// Length of the raw HTML in bytes
    pub content_length: usize,

    /// Distance from the seed URL(s) of the crawl that produced this page
    pub crawl_depth: u32,
}

/// A fetched and parsed web page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// The URL the page was requested under; unique within an index
    pub url: String,

    /// Page title, "Untitled" when none could be extracted
    pub title: String,

    /// Cleaned visible text, capped in length
    pub content: String,

    /// The raw HTML as fetched
    #[serde(skip)]
    pub raw_html: String,

    /// Host component of `url`
    pub domain: String,

    /// Absolute http(s) links in document order, capped in count
    pub links: Vec<String>,

    pub crawled_at: DateTime<Utc>,

    pub metadata: PageMetadata,
}
