use crate::index::Page;
use crate::{Result, SearchError};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Summary counters for an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_indexed_pages: usize,

    /// Distinct domains, sorted
    pub domains: Vec<String>,
}

#[derive(Debug, Default)]
struct IndexInner {
    /// Pages in first-insertion order; the scan order of `all()`
    pages: Vec<Arc<Page>>,

    /// URL to position in `pages`
    positions: HashMap<String, usize>,
}

/// Thread-safe in-memory URL → page table
///
/// Readers take a snapshot of `Arc<Page>` handles, so a scoring scan never
/// holds the lock while a concurrent crawl inserts new pages.
#[derive(Debug, Default)]
pub struct Index {
    inner: RwLock<IndexInner>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a page, replacing any page already stored under the same URL
    ///
    /// A replaced page keeps its original scan position. Returns true if the
    /// URL was not indexed before.
    pub fn insert(&self, page: Page) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let page = Arc::new(page);

        match inner.positions.get(&page.url).copied() {
            Some(position) => {
                inner.pages[position] = page;
                Ok(false)
            }
            None => {
                let position = inner.pages.len();
                inner.positions.insert(page.url.clone(), position);
                inner.pages.push(page);
                Ok(true)
            }
        }
    }

    /// Looks up the page stored under `url`
    pub fn get(&self, url: &str) -> Result<Option<Arc<Page>>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .positions
            .get(url)
            .map(|&position| Arc::clone(&inner.pages[position])))
    }

    /// Returns a snapshot of every page in insertion order
    pub fn all(&self) -> Result<Vec<Arc<Page>>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.pages.clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.inner.read().map_err(poisoned)?.pages.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn stats(&self) -> Result<IndexStats> {
        let inner = self.inner.read().map_err(poisoned)?;
        let domains: BTreeSet<&str> = inner.pages.iter().map(|p| p.domain.as_str()).collect();

        Ok(IndexStats {
            total_indexed_pages: inner.pages.len(),
            domains: domains.into_iter().map(str::to_string).collect(),
        })
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> SearchError {
    SearchError::Index("index lock poisoned by a panicked writer".to_string())
}
