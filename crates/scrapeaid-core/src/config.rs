use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for the OpenAI-compatible LLM used by the smart scraper.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAiConfig {
    /// Read configuration from environment variables.
    ///
    /// - `OPENAI_APIKEY` (required)
    /// - `SCRAPEAID_MODEL` (optional, defaults to `gpt-4o`)
    /// - `SCRAPEAID_BASE_URL` (optional, defaults to the OpenAI API)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = lookup("OPENAI_APIKEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("OPENAI_APIKEY not set. Required for smart scraping.".into())
            })?;

        let model = lookup("SCRAPEAID_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("SCRAPEAID_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
