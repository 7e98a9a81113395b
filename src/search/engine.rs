//! Search orchestration
//!
//! Each query runs through
//! `LOOKUP_INDEX → (CRAWL → MERGE if too few hits) → RANK → TRUNCATE`,
//! then the top of the ranking goes to the summarizer. Nothing inside a
//! search escapes as an error: an internal failure becomes an empty,
//! well-formed response.

use crate::assist::{ExtractiveSummarizer, SuggestionGenerator, Summarizer, TemplateSuggestions};
use crate::config::{Config, SearchConfig};
use crate::crawler::Coordinator;
use crate::index::{Index, IndexStats};
use crate::search::candidates::candidate_urls;
use crate::search::ranker::{query_terms, rank, score_pages};
use crate::search::types::{SearchQuery, SearchResponse, SearchResult};
use crate::Result;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Summary text used when the summarizer fails
pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate AI summary at this time.";

/// Maps query text to the URLs crawled when the index comes up short
pub type CandidateSource = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Engine-wide counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub total_indexed_pages: usize,
    pub total_searches: usize,
    pub domains: Vec<String>,
    pub last_search: Option<String>,
}

/// Outcome of a recursive discovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Every URL discovered, seeds first
    pub urls: Vec<String>,

    /// Pages added to or refreshed in the index
    pub indexed: usize,
}

/// The crawl → index → rank pipeline
pub struct SearchEngine {
    config: SearchConfig,
    index: Index,
    coordinator: Coordinator,
    summarizer: Arc<dyn Summarizer>,
    suggester: Arc<dyn SuggestionGenerator>,
    candidates: CandidateSource,
    history: Mutex<Vec<String>>,
}

impl SearchEngine {
    /// Creates an engine with an empty index and the offline collaborators
    pub fn new(config: &Config) -> Result<Self> {
        let coordinator = Coordinator::new(config)?;

        Ok(Self::with_collaborators(
            config,
            coordinator,
            Arc::new(ExtractiveSummarizer::new(config.search.summary_results)),
            Arc::new(TemplateSuggestions),
        ))
    }

    /// Creates an engine around a coordinator and external collaborators
    pub fn with_collaborators(
        config: &Config,
        coordinator: Coordinator,
        summarizer: Arc<dyn Summarizer>,
        suggester: Arc<dyn SuggestionGenerator>,
    ) -> Self {
        Self {
            config: config.search.clone(),
            index: Index::new(),
            coordinator,
            summarizer,
            suggester,
            candidates: Arc::new(candidate_urls),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the reference-site candidate generator
    pub fn with_candidate_source(mut self, candidates: CandidateSource) -> Self {
        self.candidates = candidates;
        self
    }

    /// Builds a query using the configured default limit
    ///
    /// The text is not checked here; `search` rejects an empty query with the
    /// fallback response.
    pub fn query(&self, text: impl Into<String>) -> SearchQuery {
        SearchQuery {
            text: text.into(),
            limit: self.config.default_limit,
            offset: 0,
            filters: None,
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Runs a query end to end
    ///
    /// Always returns a response. On internal failure the response is empty
    /// and carries `SearchResponse::FAILURE_MESSAGE`.
    pub async fn search(&self, query: SearchQuery) -> SearchResponse {
        let start = Instant::now();

        match self.run_search(&query, start).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Search error for '{}': {}", query.text, e);
                SearchResponse::fallback(query.text, start.elapsed().as_secs_f64())
            }
        }
    }

    async fn run_search(&self, query: &SearchQuery, start: Instant) -> Result<SearchResponse> {
        query.validate(self.config.max_limit)?;
        let terms = query_terms(&query.text);

        let mut results = self.lookup(&terms)?;
        if results.len() < self.config.crawl_threshold {
            tracing::debug!(
                "{} indexed hits for '{}' (threshold {}), crawling candidates",
                results.len(),
                query.text,
                self.config.crawl_threshold
            );
            self.crawl_for(&query.text).await?;
            results = self.lookup(&terms)?;
        }

        let ranked = rank(results);
        let total_results = ranked.len();

        let top = &ranked[..ranked.len().min(self.config.summary_results)];
        let ai_summary = self.summarize(&query.text, top).await;
        let suggestions = self.suggestions(&query.text).await;

        let results: Vec<SearchResult> = ranked
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        self.history().push(query.text.clone());

        let processing_time = start.elapsed().as_secs_f64();
        tracing::info!(
            "Search completed: '{}' - {} results in {:.2}s",
            query.text,
            total_results,
            processing_time
        );

        Ok(SearchResponse {
            query: query.text.clone(),
            results,
            total_results,
            processing_time,
            ai_summary: Some(ai_summary),
            suggestions,
        })
    }

    /// Scores every indexed page against the terms
    fn lookup(&self, terms: &[String]) -> Result<Vec<SearchResult>> {
        let pages = self.index.all()?;
        Ok(score_pages(&pages, terms, self.config.preview_chars))
    }

    /// Crawls the query's candidate URLs and indexes what comes back
    ///
    /// Fetches still running when the crawl budget runs out are abandoned;
    /// pages that finished in time are indexed.
    async fn crawl_for(&self, text: &str) -> Result<usize> {
        let urls: Vec<String> = (self.candidates)(text)
            .into_iter()
            .take(self.config.max_crawl_urls)
            .collect();

        let deadline = tokio::time::Instant::now() + self.config.crawl_timeout();
        let pages = self
            .coordinator
            .crawl_until(&urls, self.coordinator.max_concurrent(), deadline)
            .await;

        let mut inserted = 0;
        for page in pages {
            self.index.insert(page)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn summarize(&self, query: &str, top: &[SearchResult]) -> String {
        match self.summarizer.summarize(query, top).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Summary unavailable for '{}': {}", query, e);
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }

    /// Asks the suggestion generator for follow-up queries
    ///
    /// At most `max-suggestions` are kept; a failing generator yields none.
    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        match self.suggester.suggest(query).await {
            Ok(mut suggestions) => {
                suggestions.truncate(self.config.max_suggestions);
                suggestions
            }
            Err(e) => {
                tracing::warn!("Suggestions unavailable for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    /// Crawls and indexes a single URL, returning whether a page was indexed
    pub async fn index_url(&self, url: &str) -> bool {
        self.bulk_index(&[url.to_string()]).await == 1
    }

    /// Crawls and indexes several URLs concurrently, returning the success count
    pub async fn bulk_index(&self, urls: &[String]) -> usize {
        let pages = self
            .coordinator
            .crawl(urls, self.coordinator.max_concurrent())
            .await;

        let mut indexed = 0;
        for page in pages {
            let url = page.url.clone();
            match self.index.insert(page) {
                Ok(_) => {
                    tracing::info!("Indexed: {}", url);
                    indexed += 1;
                }
                Err(e) => tracing::error!("Error indexing {}: {}", url, e),
            }
        }

        tracing::info!("Indexed {} out of {} URLs", indexed, urls.len());
        indexed
    }

    /// Discovers URLs from the seeds and indexes every page crawled on the way
    pub async fn discover(&self, seeds: &[String], max_urls: usize) -> Result<DiscoveryReport> {
        let discovery = self.coordinator.discover_urls(seeds, max_urls).await;

        let mut indexed = 0;
        for page in discovery.pages {
            self.index.insert(page)?;
            indexed += 1;
        }

        Ok(DiscoveryReport {
            urls: discovery.urls,
            indexed,
        })
    }

    pub fn stats(&self) -> Result<EngineStats> {
        let IndexStats {
            total_indexed_pages,
            domains,
        } = self.index.stats()?;
        let history = self.history();

        Ok(EngineStats {
            total_indexed_pages,
            total_searches: history.len(),
            domains,
            last_search: history.last().cloned(),
        })
    }

    fn history(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
