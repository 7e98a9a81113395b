//! Lexical term-overlap scoring, snippets and ordering
//!
//! A page earns `TITLE_WEIGHT` for every query term found anywhere in its
//! lower-cased title and `CONTENT_WEIGHT` for every term found in its
//! lower-cased content. Matching is by substring, so "program" matches
//! "programming". There is no length or frequency normalisation.

use crate::index::Page;
use crate::search::types::SearchResult;
use std::sync::Arc;

pub const TITLE_WEIGHT: u32 = 3;
pub const CONTENT_WEIGHT: u32 = 1;

/// Characters of context kept before the earliest match
const SNIPPET_BEFORE: usize = 100;

/// Characters kept from the earliest match onwards
const SNIPPET_AFTER: usize = 200;

const ELLIPSIS: &str = "...";

/// Splits query text into lower-cased whitespace-separated terms
pub fn query_terms(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Scores a page against pre-tokenized query terms
pub fn score(terms: &[String], page: &Page) -> u32 {
    let title = page.title.to_lowercase();
    let content = page.content.to_lowercase();

    terms
        .iter()
        .map(|term| {
            let mut points = 0;
            if title.contains(term.as_str()) {
                points += TITLE_WEIGHT;
            }
            if content.contains(term.as_str()) {
                points += CONTENT_WEIGHT;
            }
            points
        })
        .sum()
}

/// Builds an excerpt of `content` around the earliest query-term match
///
/// The window spans 100 characters before the match to 200 characters after
/// its start, clamped to the content, with "..." marking trimmed ends. When
/// no term occurs the match position is taken to be the end of the content,
/// which yields the last 100 characters behind a leading ellipsis.
pub fn create_snippet(content: &str, terms: &[String]) -> String {
    let lowered = content.to_lowercase();
    let len = content.chars().count();

    let position = terms
        .iter()
        .filter_map(|term| lowered.find(term.as_str()))
        .min()
        .map(|byte| lowered[..byte].chars().count())
        .unwrap_or(len)
        .min(len);

    let start = position.saturating_sub(SNIPPET_BEFORE);
    let end = (position + SNIPPET_AFTER).min(len);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(content.chars().skip(start).take(end - start));
    if end < len {
        snippet.push_str(ELLIPSIS);
    }

    snippet.trim().to_string()
}

/// Scores every page and keeps those with a positive score, in scan order
pub fn score_pages(pages: &[Arc<Page>], terms: &[String], preview_chars: usize) -> Vec<SearchResult> {
    pages
        .iter()
        .filter_map(|page| {
            let points = score(terms, page);
            (points > 0).then(|| to_result(page, terms, points, preview_chars))
        })
        .collect()
}

/// Orders results by descending score; equal scores keep their input order
pub fn rank(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    // sort_by is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

fn to_result(page: &Page, terms: &[String], score: u32, preview_chars: usize) -> SearchResult {
    SearchResult {
        title: page.title.clone(),
        url: page.url.clone(),
        snippet: create_snippet(&page.content, terms),
        content_preview: page.content.chars().take(preview_chars).collect(),
        score,
        timestamp: page.crawled_at,
        domain: page.domain.clone(),
        metadata: page.metadata.clone(),
    }
}
