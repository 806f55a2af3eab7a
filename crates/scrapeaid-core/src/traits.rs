use std::future::Future;

use crate::error::AppError;
use crate::models::ContentMode;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Reduces raw HTML to something smaller (minified markup, Markdown, ...).
pub trait Cleaner: Send + Sync + Clone {
    fn clean(&self, html: &str) -> Result<String, AppError>;
}

/// Loads a page through a browser-automation backend.
///
/// `'static` so that concurrent dispatch can move a clone of the loader
/// into a spawned task.
pub trait PageLoader: Send + Sync + Clone + 'static {
    fn load(
        &self,
        url: &str,
        mode: ContentMode,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Answers a natural-language prompt about page content using an LLM.
pub trait Extractor: Send + Sync + Clone {
    /// Sends the prompt and content to the LLM and returns its JSON answer.
    fn extract(
        &self,
        prompt: &str,
        content: &str,
    ) -> impl Future<Output = Result<serde_json::Value, AppError>> + Send;
}
