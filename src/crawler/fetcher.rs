//! HTTP fetcher implementation
//!
//! This module performs the single GET behind every crawl:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - Issuing the request and reading the body
//! - Classifying failures (timeout, connection, non-200 status)
//!
//! There are no retries at this layer. Failures are returned as values and
//! never propagate as errors.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Cause of a fetch that produced no usable body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The total request timeout elapsed
    Timeout,

    /// DNS, TCP or TLS failure before a response arrived
    Connect,

    /// The response started but its body could not be read
    Body,

    /// Anything else reqwest reports (invalid URL, redirect limit, ...)
    Other,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection error",
            Self::Body => "body read error",
            Self::Other => "request error",
        };
        f.write_str(label)
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 and the body was read
    Success {
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No response could be obtained
    NetworkError {
        /// Classified cause
        kind: FetchFailure,
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by every crawl worker
///
/// # Example
///
/// ```no_run
/// use mawrid_search::config::Config;
/// use mawrid_search::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(crawler.request_timeout())
        .connect_timeout(crawler.request_timeout().min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200, body read | `Success` |
/// | HTTP 200, body unreadable | `NetworkError { kind: Body }` |
/// | Any other status | `HttpError` |
/// | Timeout | `NetworkError { kind: Timeout }` |
/// | Connection failure | `NetworkError { kind: Connect }` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) if e.is_timeout() => FetchResult::NetworkError {
            kind: FetchFailure::Timeout,
            error: e.to_string(),
        },
        Err(e) => FetchResult::NetworkError {
            kind: FetchFailure::Body,
            error: e.to_string(),
        },
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect
    } else {
        FetchFailure::Other
    };

    FetchResult::NetworkError {
        kind,
        error: e.to_string(),
    }
}
