use std::collections::HashSet;
use std::time::Duration;

/// Outcome of offering a URL to the crawl policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// URL is new and within depth; it has been marked visited
    Admitted,

    /// URL was already visited in this session
    AlreadyVisited,

    /// URL lies deeper than the configured maximum depth
    DepthExceeded,
}

/// Per-session crawl policy state
///
/// The visited set only ever grows: a URL that has been admitted once is
/// never fetched again by the same owner, whether or not its fetch succeeded.
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    max_depth: u32,
    delay: Duration,
}

impl CrawlState {
    pub fn new(max_depth: u32, delay: Duration) -> Self {
        Self {
            visited: HashSet::new(),
            max_depth,
            delay,
        }
    }

    /// Checks depth and dedup policy for a URL, marking it visited if admitted
    ///
    /// Depth is checked first, so a URL rejected for depth is not recorded and
    /// may still be admitted later from a shallower path.
    pub fn admit(&mut self, url: &str, depth: u32) -> Admission {
        if depth > self.max_depth {
            return Admission::DepthExceeded;
        }

        if !self.visited.insert(url.to_string()) {
            return Admission::AlreadyVisited;
        }

        Admission::Admitted
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CrawlState {
        CrawlState::new(2, Duration::from_millis(10))
    }

    #[test]
    fn test_first_visit_admitted() {
        let mut state = state();
        assert_eq!(state.admit("https://example.com/", 0), Admission::Admitted);
        assert!(state.is_visited("https://example.com/"));
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_second_visit_rejected() {
        let mut state = state();
        state.admit("https://example.com/", 0);
        assert_eq!(
            state.admit("https://example.com/", 1),
            Admission::AlreadyVisited
        );
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let mut state = state();
        assert_eq!(state.admit("https://example.com/a", 2), Admission::Admitted);
        assert_eq!(
            state.admit("https://example.com/b", 3),
            Admission::DepthExceeded
        );
    }

    #[test]
    fn test_too_deep_url_not_marked_visited() {
        let mut state = state();
        state.admit("https://example.com/deep", 5);
        assert!(!state.is_visited("https://example.com/deep"));
        assert_eq!(state.admit("https://example.com/deep", 1), Admission::Admitted);
    }

    #[test]
    fn test_no_normalization_between_variants() {
        let mut state = state();
        assert_eq!(state.admit("https://example.com/page", 0), Admission::Admitted);
        assert_eq!(state.admit("https://example.com/page/", 0), Admission::Admitted);
    }
}
