//! Mawrid Search: an on-demand crawl, index and rank engine
//!
//! This crate fetches web pages concurrently, extracts their text into an
//! in-memory index, ranks indexed pages against free-text queries by term
//! overlap, and hands the top results to pluggable summary and suggestion
//! collaborators.

pub mod assist;
pub mod config;
pub mod crawler;
pub mod index;
pub mod search;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Mawrid Search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Index error: {0}")]
    Index(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Query validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query text cannot be empty")]
    Empty,

    #[error("limit must be between 1 and {max}, got {got}")]
    Limit { got: usize, max: usize },
}

/// Result type alias for Mawrid Search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use index::{Index, Page, PageMetadata};
pub use search::{SearchEngine, SearchQuery, SearchResponse, SearchResult};
