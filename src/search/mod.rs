//! Query handling: ranking, candidate discovery and the search pipeline
//!
//! - `types`: query, result and response shapes
//! - `ranker`: term-overlap scoring, snippets and stable ordering
//! - `candidates`: reference-site URLs crawled when the index comes up short
//! - `engine`: the orchestrator tying index, crawler and collaborators together

mod candidates;
mod engine;
mod ranker;
mod types;

pub use candidates::candidate_urls;
pub use engine::{CandidateSource, DiscoveryReport, EngineStats, SearchEngine, SUMMARY_UNAVAILABLE};
pub use ranker::{create_snippet, query_terms, rank, score, score_pages, CONTENT_WEIGHT, TITLE_WEIGHT};
pub use types::{SearchQuery, SearchResponse, SearchResult, DEFAULT_LIMIT};
