//! In-memory page index
//!
//! The index maps a page URL to the most recently crawled version of that
//! page. It is owned by the search engine (no process-wide singleton) and is
//! rebuilt from scratch every process lifetime.

mod memory;
mod page;

pub use memory::{Index, IndexStats};
pub use page::{Page, PageMetadata};
