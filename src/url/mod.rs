//! URL handling module for Mawrid Search
//!
//! Domain extraction and the scheme policy shared by the parser and the
//! crawl coordinator. URLs are compared by string equality after resolution;
//! no further normalization is applied.

mod domain;

pub use domain::{domain_of, extract_domain};

use url::Url;

/// Returns true if the URL uses a scheme the crawler will fetch
pub fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
