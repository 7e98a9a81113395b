//! Mawrid Search main entry point
//!
//! This is the command-line interface for the Mawrid search engine. Every
//! subcommand prints its result as JSON on stdout; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mawrid_search::config::{load_config_with_hash, Config};
use mawrid_search::SearchEngine;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mawrid Search: crawl, index and rank the web on demand
///
/// Queries are answered from an in-memory index. When the index holds too
/// few matches, reference pages for the query are crawled first.
#[derive(Parser, Debug)]
#[command(name = "mawrid-search")]
#[command(version = "1.0.0")]
#[command(about = "An on-demand crawl, index and rank search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a query, crawling reference pages if the index comes up short
    Search {
        query: String,

        /// Maximum number of results returned
        #[arg(long)]
        limit: Option<usize>,

        /// Number of ranked results skipped
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// URLs indexed before the query runs
        #[arg(long = "seed", value_name = "URL")]
        seeds: Vec<String>,
    },

    /// Crawl and index a single URL
    Index { url: String },

    /// Crawl and index several URLs concurrently
    BulkIndex {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Discover URLs by following links from the seeds, indexing as it goes
    Discover {
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Stop once this many URLs are known
        #[arg(long, default_value_t = 1000)]
        max_urls: usize,
    },

    /// Print follow-up query suggestions
    Suggest { query: String },
}

#[derive(Serialize)]
struct IndexOutcome<'a> {
    url: &'a str,
    indexed: bool,
}

#[derive(Serialize)]
struct BulkOutcome {
    requested: usize,
    indexed: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_ref())?;
    let engine = SearchEngine::new(&config).context("failed to start search engine")?;

    match cli.command {
        Command::Search {
            query,
            limit,
            offset,
            seeds,
        } => {
            if !seeds.is_empty() {
                engine.bulk_index(&seeds).await;
            }

            let mut query = engine.query(query).with_offset(offset);
            if let Some(limit) = limit {
                query = query.with_limit(limit);
            }
            print_json(&engine.search(query).await)?;
        }
        Command::Index { url } => {
            let indexed = engine.index_url(&url).await;
            print_json(&IndexOutcome { url: &url, indexed })?;
        }
        Command::BulkIndex { urls } => {
            let indexed = engine.bulk_index(&urls).await;
            print_json(&BulkOutcome {
                requested: urls.len(),
                indexed,
            })?;
        }
        Command::Discover { seeds, max_urls } => {
            let report = engine.discover(&seeds, max_urls).await?;
            print_json(&report)?;
        }
        Command::Suggest { query } => {
            print_json(&engine.suggestions(&query).await)?;
        }
    }

    tracing::debug!("Engine stats: {:?}", engine.stats()?);
    Ok(())
}

/// Loads configuration from a file, or the defaults when no path is given
fn load(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e).with_context(|| format!("invalid configuration in {}", path.display()))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mawrid_search=info,warn"),
            1 => EnvFilter::new("mawrid_search=debug,info"),
            2 => EnvFilter::new("mawrid_search=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
