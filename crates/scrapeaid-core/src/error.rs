use thiserror::Error;

/// Application-wide error types for scrapeaid.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// LLM API call failed.
    #[error("LLM error (HTTP {status_code}): {message}")]
    LlmError { message: String, status_code: u16 },

    /// HTML cleaning (minify / Markdown conversion) failed.
    #[error("Cleaner error: {0}")]
    CleanerError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Browser automation (CDP session, page load) failed.
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// An optional integration was not compiled into this build.
    #[error("{feature} support is not installed. {hint}")]
    MissingDependency {
        feature: &'static str,
        hint: &'static str,
    },

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Maps a `reqwest`-style failure description onto the matching variant.
    ///
    /// Adapters call this with the flags reported by their HTTP client so the
    /// classification stays in one place.
    pub fn from_transport(timed_out: bool, connect: bool, timeout_secs: u64, msg: String) -> Self {
        if timed_out {
            AppError::Timeout(timeout_secs)
        } else if connect {
            AppError::NetworkError(format!("Connection failed: {msg}"))
        } else {
            AppError::HttpError(msg)
        }
    }
}
