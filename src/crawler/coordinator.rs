//! Crawler coordinator - bounded, paced, deduplicated crawling
//!
//! The coordinator owns the crawl policy (`CrawlState`) and drives a pool of
//! fetch workers:
//! - URLs are admitted against the visited set and depth limit before any
//!   fetch is issued
//! - At most `max_concurrent` workers fetch at once, each paced by its own
//!   `Pacer`
//! - Workers report back over a channel; only the coordinating task touches
//!   shared state
//! - A failed or panicked fetch is dropped without affecting its siblings
//!
//! Dropping a crawl future aborts its workers; their results are discarded.

use crate::config::Config;
use crate::crawler::parser::{parse_html, ParseLimits};
use crate::crawler::scheduler::Pacer;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::index::{Page, PageMetadata};
use crate::state::{Admission, CrawlState};
use crate::url::{extract_domain, is_crawlable};
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use url::Url;

/// A URL to crawl together with its distance from the crawl's seeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: u32,
}

impl CrawlTarget {
    pub fn seed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            depth: 0,
        }
    }
}

/// Outcome of recursive link discovery
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Every URL discovered, seeds first, in discovery order
    pub urls: Vec<String>,

    /// Pages successfully crawled along the way
    pub pages: Vec<Page>,
}

/// One admitted URL handed to the worker pool
#[derive(Debug)]
struct Job {
    seq: usize,
    /// The URL exactly as offered; the visited-set and index key
    key: String,
    /// Parsed form, the base for resolving relative links
    url: Url,
    depth: u32,
}

/// Completion event sent from a worker to the coordinating task
#[derive(Debug)]
enum CrawlEvent {
    Fetched { seq: usize, page: Page },
    Failed { url: String, reason: String },
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    state: Mutex<CrawlState>,
    limits: ParseLimits,
    max_concurrent: usize,
    batch_size: usize,
}

impl Coordinator {
    /// Creates a coordinator with a fresh visited set and its own HTTP client
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a coordinator around an existing HTTP client
    pub fn with_client(client: Client, config: &Config) -> Self {
        let crawler = &config.crawler;

        Self {
            client,
            state: Mutex::new(CrawlState::new(crawler.max_depth, crawler.crawl_delay())),
            limits: ParseLimits::from(crawler),
            max_concurrent: crawler.max_concurrent.max(1),
            batch_size: crawler.discovery_batch_size.max(1),
        }
    }

    /// The configured worker count used when callers do not pick one
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of URLs admitted so far
    pub fn visited_count(&self) -> usize {
        self.state().visited_count()
    }

    /// Crawls seed URLs (depth 0) with at most `max_concurrent` fetches in flight
    ///
    /// Returns the successfully parsed pages in input order. URLs that fail,
    /// were already visited, or are out of policy are left out silently.
    pub async fn crawl(&self, urls: &[String], max_concurrent: usize) -> Vec<Page> {
        let targets = urls.iter().cloned().map(CrawlTarget::seed).collect();
        self.run_batch(targets, max_concurrent, None, &mut Vec::new())
            .await
    }

    /// Crawls seed URLs, giving up on unfinished fetches at `deadline`
    ///
    /// Pages fetched before the deadline are returned in input order. URLs
    /// still in flight or queued at the deadline stay visited.
    pub async fn crawl_until(
        &self,
        urls: &[String],
        max_concurrent: usize,
        deadline: Instant,
    ) -> Vec<Page> {
        let targets = urls.iter().cloned().map(CrawlTarget::seed).collect();
        self.run_batch(targets, max_concurrent, Some(deadline), &mut Vec::new())
            .await
    }

    /// Crawls targets at explicit depths
    pub async fn crawl_targets(&self, targets: Vec<CrawlTarget>, max_concurrent: usize) -> Vec<Page> {
        self.run_batch(targets, max_concurrent, None, &mut Vec::new())
            .await
    }

    /// Runs one batch through the worker pool
    ///
    /// Workers take their pacers from `pacers` (new ones are made when it runs
    /// short) and hand them back when they finish, so consecutive batches
    /// keep each worker's spacing.
    async fn run_batch(
        &self,
        targets: Vec<CrawlTarget>,
        max_concurrent: usize,
        deadline: Option<Instant>,
        pacers: &mut Vec<Pacer>,
    ) -> Vec<Page> {
        let (jobs, delay) = self.admit(targets);
        if jobs.is_empty() {
            return Vec::new();
        }

        let job_count = jobs.len();
        let worker_count = max_concurrent.max(1).min(job_count);
        tracing::debug!(
            "Crawling {} URLs with {} workers ({:?} delay)",
            job_count,
            worker_count,
            delay
        );

        let (job_tx, job_rx) = mpsc::unbounded_channel();
        for job in jobs {
            // The receiver is alive in this scope, so send cannot fail
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let job_rx = Arc::new(tokio::sync::Mutex::new(job_rx));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();

        for _ in 0..worker_count {
            let pacer = pacers.pop().unwrap_or_else(|| Pacer::new(delay));
            workers.spawn(run_worker(
                self.client.clone(),
                Arc::clone(&job_rx),
                event_tx.clone(),
                pacer,
                self.limits,
            ));
        }
        drop(event_tx);

        let mut fetched = Vec::with_capacity(job_count);
        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, event_rx.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        workers.abort_all();
                        // Events sent before the abort are still complete
                        while let Ok(event) = event_rx.try_recv() {
                            record(event, &mut fetched);
                        }
                        tracing::warn!(
                            "Crawl deadline reached with {} of {} URLs fetched, abandoning the rest",
                            fetched.len(),
                            job_count
                        );
                        break;
                    }
                },
                None => event_rx.recv().await,
            };

            match next {
                Some(event) => record(event, &mut fetched),
                None => break,
            }
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(pacer) => pacers.push(pacer),
                Err(e) if e.is_cancelled() => {}
                Err(e) => tracing::warn!("Crawl worker ended abnormally: {}", e),
            }
        }

        fetched.sort_by_key(|(seq, _)| *seq);
        fetched.into_iter().map(|(_, page)| page).collect()
    }

    /// Discovers URLs breadth-first from the seeds
    ///
    /// The frontier is crawled in fixed-size batches. Links found on crawled
    /// pages join the frontier one level deeper unless they were already
    /// visited or discovered. Stops when `max_urls` URLs are known or the
    /// frontier runs dry.
    pub async fn discover_urls(&self, seeds: &[String], max_urls: usize) -> Discovery {
        let mut known: HashSet<String> = HashSet::new();
        let mut discovery = Discovery::default();
        let mut frontier = VecDeque::new();
        let mut pacers = Vec::new();

        for seed in seeds {
            if known.insert(seed.clone()) {
                discovery.urls.push(seed.clone());
                frontier.push_back(CrawlTarget::seed(seed.clone()));
            }
        }

        while !frontier.is_empty() && known.len() < max_urls {
            let take = self.batch_size.min(frontier.len());
            let batch: Vec<CrawlTarget> = frontier.drain(..take).collect();

            let pages = self
                .run_batch(batch, self.max_concurrent, None, &mut pacers)
                .await;

            for page in &pages {
                for link in &page.links {
                    if known.len() >= max_urls {
                        break;
                    }
                    if known.contains(link) || self.state().is_visited(link) {
                        continue;
                    }

                    known.insert(link.clone());
                    discovery.urls.push(link.clone());
                    frontier.push_back(CrawlTarget {
                        url: link.clone(),
                        depth: page.metadata.crawl_depth + 1,
                    });
                }
            }

            discovery.pages.extend(pages);
        }

        tracing::info!(
            "Discovery finished: {} URLs known, {} pages crawled",
            discovery.urls.len(),
            discovery.pages.len()
        );

        discovery
    }

    /// Applies scheme, depth and visited policy; admitted URLs become jobs
    fn admit(&self, targets: Vec<CrawlTarget>) -> (Vec<Job>, Duration) {
        let mut state = self.state();
        let mut jobs = Vec::new();

        for target in targets {
            let url = match Url::parse(&target.url) {
                Ok(url) if is_crawlable(&url) => url,
                _ => {
                    tracing::debug!("Skipping unfetchable URL {}", target.url);
                    continue;
                }
            };

            match state.admit(&target.url, target.depth) {
                Admission::Admitted => jobs.push(Job {
                    seq: jobs.len(),
                    key: target.url,
                    url,
                    depth: target.depth,
                }),
                Admission::AlreadyVisited => {
                    tracing::debug!("Skipping already visited {}", target.url);
                }
                Admission::DepthExceeded => {
                    tracing::debug!(
                        "Skipping {} at depth {} (max {})",
                        target.url,
                        target.depth,
                        state.max_depth()
                    );
                }
            }
        }

        (jobs, state.delay())
    }

    fn state(&self) -> MutexGuard<'_, CrawlState> {
        // The visited set stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn record(event: CrawlEvent, fetched: &mut Vec<(usize, Page)>) {
    match event {
        CrawlEvent::Fetched { seq, page } => {
            tracing::info!("Crawled: {} (depth: {})", page.url, page.metadata.crawl_depth);
            fetched.push((seq, page));
        }
        CrawlEvent::Failed { url, reason } => {
            tracing::debug!("Dropped {}: {}", url, reason);
        }
    }
}

/// Pulls jobs until the queue is empty, fetching and parsing each one
///
/// Returns the worker's pacer so a following batch can keep its spacing.
async fn run_worker(
    client: Client,
    jobs: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<Job>>>,
    events: mpsc::UnboundedSender<CrawlEvent>,
    mut pacer: Pacer,
    limits: ParseLimits,
) -> Pacer {
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };

        pacer.wait().await;
        let event = process_job(&client, job, limits).await;

        if events.send(event).is_err() {
            // The coordinating task is gone; nobody wants the rest
            break;
        }
    }

    pacer
}

async fn process_job(client: &Client, job: Job, limits: ParseLimits) -> CrawlEvent {
    match fetch_url(client, &job.key).await {
        FetchResult::Success {
            status_code,
            content_type,
            body,
        } => {
            let page = build_page(&job, status_code, content_type, body, limits);
            CrawlEvent::Fetched { seq: job.seq, page }
        }
        FetchResult::HttpError { status_code } => CrawlEvent::Failed {
            url: job.key,
            reason: format!("HTTP {}", status_code),
        },
        FetchResult::NetworkError { kind, error } => CrawlEvent::Failed {
            url: job.key,
            reason: format!("{}: {}", kind, error),
        },
    }
}

/// Turns a successful fetch into an indexable page
fn build_page(
    job: &Job,
    status_code: u16,
    content_type: String,
    body: String,
    limits: ParseLimits,
) -> Page {
    let parsed = parse_html(&body, &job.url, limits);

    Page {
        url: job.key.clone(),
        title: parsed.title,
        content: parsed.content,
        domain: extract_domain(&job.url).unwrap_or_default(),
        links: parsed.links,
        crawled_at: Utc::now(),
        metadata: PageMetadata {
            status_code,
            content_type,
            content_length: body.len(),
            crawl_depth: job.depth,
        },
        raw_html: body,
    }
}
