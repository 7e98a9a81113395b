use crate::index::PageMetadata;
use crate::QueryError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Page size for queries built without an engine; `SearchEngine::query`
/// uses the configured `default-limit` instead
pub const DEFAULT_LIMIT: usize = 20;

/// A free-text search request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Query text; must contain something other than whitespace
    pub text: String,

    /// Maximum number of results returned
    pub limit: usize,

    /// Number of ranked results skipped before the returned page
    pub offset: usize,

    /// Caller-supplied filters, carried through untouched
    pub filters: Option<HashMap<String, serde_json::Value>>,
}

impl SearchQuery {
    /// Creates a query with the default limit and no offset
    pub fn new(text: impl Into<String>) -> Result<Self, QueryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(Self {
            text,
            limit: DEFAULT_LIMIT,
            offset: 0,
            filters: None,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_filters(mut self, filters: HashMap<String, serde_json::Value>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Checks the query against the entry-point bounds
    pub fn validate(&self, max_limit: usize) -> Result<(), QueryError> {
        if self.text.trim().is_empty() {
            return Err(QueryError::Empty);
        }

        if self.limit < 1 || self.limit > max_limit {
            return Err(QueryError::Limit {
                got: self.limit,
                max: max_limit,
            });
        }

        Ok(())
    }
}

/// One ranked hit, derived from an indexed page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,

    /// Excerpt around the earliest query-term match
    pub snippet: String,

    /// Leading slice of the page content
    pub content_preview: String,

    pub score: u32,

    /// When the source page was crawled
    pub timestamp: DateTime<Utc>,

    pub domain: String,
    pub metadata: PageMetadata,
}

/// Everything returned for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub query: String,

    /// The `[offset, offset + limit)` slice of the ranking
    pub results: Vec<SearchResult>,

    /// Size of the whole ranking, before truncation
    pub total_results: usize,

    /// Wall-clock seconds spent on the query
    pub processing_time: f64,

    pub ai_summary: Option<String>,
    pub suggestions: Vec<String>,
}

impl SearchResponse {
    /// Message shown in place of results when a search fails internally
    pub const FAILURE_MESSAGE: &'static str = "Search encountered an error. Please try again.";

    /// Builds the well-formed empty response used for internal failures
    pub fn fallback(query: impl Into<String>, processing_time: f64) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
            total_results: 0,
            processing_time,
            ai_summary: Some(Self::FAILURE_MESSAGE.to_string()),
            suggestions: Vec::new(),
        }
    }
}
