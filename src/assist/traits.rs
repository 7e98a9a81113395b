use crate::search::SearchResult;
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by an external collaborator
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Collaborator request failed: {0}")]
    Request(String),
}

/// Result type for collaborator calls
pub type AssistResult<T> = Result<T, AssistError>;

/// Produces a prose summary of the top results for a query
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, query: &str, results: &[SearchResult]) -> AssistResult<String>;
}

/// Proposes follow-up queries, best first
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn suggest(&self, query: &str) -> AssistResult<Vec<String>>;
}
