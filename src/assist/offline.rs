use crate::assist::traits::{AssistError, AssistResult, SuggestionGenerator, Summarizer};
use crate::search::SearchResult;
use async_trait::async_trait;

/// Summarizer that stitches the top results into a numbered digest
///
/// Each entry carries the result's title, URL and snippet, the same context a
/// model-backed summarizer would be prompted with.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    max_results: usize,
}

impl ExtractiveSummarizer {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(5)
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, query: &str, results: &[SearchResult]) -> AssistResult<String> {
        if results.is_empty() {
            return Err(AssistError::Unavailable(format!(
                "no results to summarize for '{}'",
                query
            )));
        }

        let entries: Vec<String> = results
            .iter()
            .take(self.max_results)
            .enumerate()
            .map(|(i, result)| {
                format!(
                    "Result {}:\nTitle: {}\nURL: {}\nContent: {}",
                    i + 1,
                    result.title,
                    result.url,
                    result.snippet
                )
            })
            .collect();

        Ok(format!(
            "Top sources for \"{}\":\n\n{}",
            query,
            entries.join("\n\n")
        ))
    }
}

/// Suggestion generator built from fixed query templates
#[derive(Debug, Clone, Default)]
pub struct TemplateSuggestions;

const SUGGESTION_TEMPLATES: &[&str] = &[
    "what is {}",
    "{} tutorial",
    "{} examples",
    "{} history",
    "{} best practices",
    "latest {} news",
];

#[async_trait]
impl SuggestionGenerator for TemplateSuggestions {
    async fn suggest(&self, query: &str) -> AssistResult<Vec<String>> {
        let topic = query.split_whitespace().collect::<Vec<_>>().join(" ");
        if topic.is_empty() {
            return Ok(Vec::new());
        }

        Ok(SUGGESTION_TEMPLATES
            .iter()
            .map(|template| template.replace("{}", &topic))
            .collect())
    }
}
