//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::models::ContentMode;
use crate::traits::{Cleaner, Extractor, Fetcher, PageLoader};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    /// URLs passed to `fetch`, in call order.
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self::with_responses(vec![Ok(html.to_string())])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockCleaner
// ---------------------------------------------------------------------------

/// Mock cleaner that returns its input unchanged, or a queued error.
#[derive(Clone)]
pub struct MockCleaner {
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockCleaner {
    /// Creates a cleaner that returns the input unchanged.
    pub fn passthrough() -> Self {
        Self {
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a cleaner that returns an error.
    pub fn with_error(error: AppError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl Cleaner for MockCleaner {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        Ok(html.to_string())
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that returns configurable JSON and records its inputs.
#[derive(Clone)]
pub struct MockExtractor {
    responses: Arc<Mutex<Vec<Result<serde_json::Value, AppError>>>>,
    /// `(prompt, content)` pairs passed to `extract`.
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockExtractor {
    pub fn new(data: serde_json::Value) -> Self {
        Self::with_responses(vec![Ok(data)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<serde_json::Value, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Extractor for MockExtractor {
    async fn extract(&self, prompt: &str, content: &str) -> Result<serde_json::Value, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), content.to_string()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(serde_json::json!({"default": true}))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockPageLoader
// ---------------------------------------------------------------------------

/// Mock browser loader.
///
/// Returns `"{mode}:{url}"` (`mode` being `text` or `html`) after an optional
/// per-URL delay, or a `BrowserError` for URLs registered as failures.
#[derive(Clone, Default)]
pub struct MockPageLoader {
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
    completed: Arc<Mutex<Vec<String>>>,
}

impl MockPageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.failures.insert(url.to_string(), message.to_string());
        self
    }

    /// URLs whose load succeeded, in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl PageLoader for MockPageLoader {
    async fn load(&self, url: &str, mode: ContentMode) -> Result<String, AppError> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(url) {
            return Err(AppError::BrowserError(message.clone()));
        }
        self.completed.lock().unwrap().push(url.to_string());
        let prefix = match mode {
            ContentMode::Text => "text",
            ContentMode::Html => "html",
        };
        Ok(format!("{prefix}:{url}"))
    }
}
