//! HTML parser for extracting page text, title and links
//!
//! Parsing is a pure function of the HTML and its source URL. Malformed
//! markup never fails: html5ever recovers whatever structure it can, and the
//! extractors fall back to empty text, no links, and the "Untitled" title.

use crate::config::CrawlerConfig;
use crate::url::is_crawlable;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Title used when a page declares neither `<title>` nor `<h1>`
pub const UNTITLED: &str = "Untitled";

/// Subtrees whose text never reaches the extracted content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Size caps applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum content length in characters
    pub max_content_chars: usize,

    /// Maximum number of links kept
    pub max_links: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_content_chars: 5000,
            max_links: 50,
        }
    }
}

impl From<&CrawlerConfig> for ParseLimits {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_content_chars: config.max_content_chars,
            max_links: config.max_links,
        }
    }
}

/// Extracted information from an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// `<title>`, else first `<h1>`, else "Untitled"
    pub title: String,

    /// Visible text with whitespace runs collapsed, capped in length
    pub content: String,

    /// Absolute http(s) links in document order, capped in count
    pub links: Vec<String>,
}

/// Parses HTML content into title, content and links
///
/// # Example
///
/// ```
/// use mawrid_search::crawler::{parse_html, ParseLimits};
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, ParseLimits::default());
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, limits: ParseLimits) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        content: extract_content(&document, limits.max_content_chars),
        links: extract_links(&document, base_url, limits.max_links),
    }
}

/// Extracts the page title, first match wins
fn extract_title(document: &Html) -> String {
    ["title", "h1"]
        .iter()
        .find_map(|tag| first_text(document, tag))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn first_text(document: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts visible text, collapsing whitespace and truncating without a marker
fn extract_content(document: &Html, max_chars: usize) -> String {
    let mut raw = String::new();
    collect_visible_text(document.root_element(), &mut raw);

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !SKIPPED_ELEMENTS.contains(&child_element.value().name()) {
                collect_visible_text(child_element, out);
            }
        }
    }
}

/// Extracts `a[href]` targets resolved against the base URL
fn extract_links(document: &Html, base_url: &Url, max_links: usize) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .take(max_links)
        .collect()
}

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None for hrefs that do not resolve or resolve to another scheme
/// (`javascript:`, `mailto:`, `tel:`, `data:`, ...).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    base_url
        .join(href.trim())
        .ok()
        .filter(is_crawlable)
        .map(String::from)
}
