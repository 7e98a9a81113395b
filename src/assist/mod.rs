//! External collaborators of the search engine
//!
//! Summaries and follow-up suggestions come from outside the core, usually a
//! generative model. The engine only sees the traits defined here and treats
//! every failure as "not available".
//!
//! The offline implementations let the engine run with no model at all.

mod offline;
mod traits;

pub use offline::{ExtractiveSummarizer, TemplateSuggestions};
pub use traits::{AssistError, AssistResult, SuggestionGenerator, Summarizer};
