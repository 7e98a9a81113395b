use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or None if the URL has no
/// host (e.g. `mailto:` or `data:` URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mawrid_search::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the domain from a URL string, or an empty string when the input
/// does not parse or has no host
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .as_ref()
        .and_then(extract_domain)
        .unwrap_or_default()
}
