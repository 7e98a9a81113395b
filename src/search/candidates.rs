//! Candidate URLs for query-triggered crawls
//!
//! There is no external search API behind the engine. When the index cannot
//! answer a query, the engine crawls a fixed set of reference-site pages
//! derived from the query text.

use url::form_urlencoded::byte_serialize;

/// Reference-site templates: URL prefix and the separator placed between
/// query words
const TEMPLATES: &[(&str, &str)] = &[
    ("https://en.wikipedia.org/wiki/", "_"),
    ("https://www.britannica.com/search?query=", "+"),
    ("https://www.merriam-webster.com/dictionary/", "%20"),
];

/// Derives candidate URLs from query text
///
/// Words are percent-encoded individually and joined with each site's
/// separator, so the same query always yields the same URLs.
///
/// # Example
///
/// ```
/// use mawrid_search::search::candidate_urls;
///
/// let urls = candidate_urls("machine learning");
/// assert_eq!(urls[0], "https://en.wikipedia.org/wiki/machine_learning");
/// ```
pub fn candidate_urls(query: &str) -> Vec<String> {
    let words: Vec<String> = query
        .split_whitespace()
        .map(|word| byte_serialize(word.as_bytes()).collect())
        .collect();

    if words.is_empty() {
        return Vec::new();
    }

    TEMPLATES
        .iter()
        .map(|&(prefix, separator)| format!("{}{}", prefix, words.join(separator)))
        .collect()
}
