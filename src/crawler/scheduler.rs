//! Per-worker request pacing
//!
//! Every crawl worker owns one `Pacer`. Before each fetch the worker waits
//! until at least `delay` has passed since its own previous fetch started.
//! Workers do not share a pacer, so with N workers the crawl issues up to
//! N requests per `delay` interval.

use std::time::Duration;
use tokio::time::Instant;

/// Fixed-interval rate limiter for a single worker
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Minimum spacing between two fetch starts
    delay: Duration,

    /// When this worker last started a fetch
    last_fetch: Option<Instant>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fetch: None,
        }
    }

    /// Returns how long the worker must still wait, or None if it may fetch now
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fetch?;
        let elapsed = now.saturating_duration_since(last);

        if elapsed >= self.delay {
            None
        } else {
            Some(self.delay - elapsed)
        }
    }

    /// Sleeps until the worker may fetch again, then records the fetch start
    pub async fn wait(&mut self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::trace!("Pacing worker for {:?}", wait);
            tokio::time::sleep(wait).await;
        }

        self.last_fetch = Some(Instant::now());
    }
}
