use std::sync::{Arc, LazyLock};

use htmd::HtmlToMarkdown;
use regex::Regex;
use scrapeaid_core::error::AppError;
use scrapeaid_core::traits::Cleaner;

/// Tags dropped before conversion: they carry no readable content.
const DEFAULT_SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "head", "template",
];

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line regex is valid"));

/// HTML-to-Markdown cleaner using htmd.
///
/// Used by the smart scraper to shrink pages before they are sent to the
/// LLM. Navigation and footers are kept (prompts often ask about links);
/// only non-content elements are skipped.
#[derive(Clone)]
pub struct MarkdownCleaner {
    converter: Arc<HtmlToMarkdown>,
}

impl MarkdownCleaner {
    pub fn new() -> Self {
        Self::with_skip_tags(DEFAULT_SKIP_TAGS)
    }

    /// Builds a cleaner that drops the given tags (and their children).
    pub fn with_skip_tags(tags: &[&'static str]) -> Self {
        let converter = HtmlToMarkdown::builder()
            .skip_tags(tags.to_vec())
            .build();

        Self {
            converter: Arc::new(converter),
        }
    }
}

impl Default for MarkdownCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner for MarkdownCleaner {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        let markdown = self
            .converter
            .convert(html)
            .map_err(|e| AppError::CleanerError(e.to_string()))?;
        Ok(BLANK_RUNS.replace_all(markdown.trim(), "\n\n").into_owned())
    }
}
