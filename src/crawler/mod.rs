//! Crawler module for web page fetching and processing
//!
//! This module contains the crawl half of the pipeline:
//! - HTTP fetching with failure classification
//! - HTML parsing into title, text and links
//! - Per-worker request pacing
//! - Bounded, deduplicated crawl coordination and link discovery

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, CrawlTarget, Discovery};
pub use fetcher::{build_http_client, fetch_url, FetchFailure, FetchResult};
pub use parser::{parse_html, ParseLimits, ParsedPage, UNTITLED};
pub use scheduler::Pacer;
