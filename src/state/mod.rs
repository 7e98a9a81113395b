//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the visited set and depth policy owned by a coordinator
//! - `Admission`: the outcome of asking whether a URL may be fetched

mod crawl_state;

pub use crawl_state::{Admission, CrawlState};
