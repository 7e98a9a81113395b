//! Configuration module for Mawrid Search
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a missing file is equivalent to `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use mawrid_search::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mawrid.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SearchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
