use std::time::Duration;

use reqwest::Client;
use scrapeaid_core::config::OpenAiConfig;
use scrapeaid_core::error::AppError;
use scrapeaid_core::traits::Extractor;
use serde::{Deserialize, Serialize};

const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_SYSTEM_PROMPT: &str = "You are a web scraping assistant. Answer the user's question using only the provided page content. Respond ONLY with a valid JSON object. If the content does not contain the answer, respond with {\"content\": \"NA\"}.";

/// OpenAI-compatible LLM client that answers prompts about page content.
///
/// Works with any OpenAI-compatible API, including:
/// - OpenAI directly (`https://api.openai.com/v1`)
/// - Gemini via compatibility layer (`https://generativelanguage.googleapis.com/v1beta/openai`)
/// - Local servers such as Ollama (`http://localhost:11434/v1`)
#[derive(Clone)]
pub struct OpenAiExtractor {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
    system_prompt: String,
}

impl OpenAiExtractor {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Result<Self, AppError> {
        Self::build(api_key, model, base_url, DEFAULT_LLM_TIMEOUT)
    }

    pub fn from_config(config: &OpenAiConfig) -> Result<Self, AppError> {
        Self::new(&config.api_key, &config.model, &config.base_url)
    }

    pub fn with_timeout(self, timeout: Duration) -> Result<Self, AppError> {
        let system_prompt = self.system_prompt.clone();
        Ok(Self::build(&self.api_key, &self.model, &self.base_url, timeout)?
            .with_system_prompt(system_prompt))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout_secs: timeout.as_secs(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        })
    }
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: std::borrow::Cow<'a, str>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Models sometimes wrap JSON in a Markdown code fence despite instructions.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

impl Extractor for OpenAiExtractor {
    async fn extract(&self, prompt: &str, content: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: self.system_prompt.as_str().into(),
                },
                Message {
                    role: "user",
                    content: format!("Question: {prompt}\n\nPage content:\n\n{content}").into(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        tracing::debug!(model = %self.model, content_bytes = content.len(), "Sending LLM request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::from_transport(
                    e.is_timeout(),
                    e.is_connect(),
                    self.timeout_secs,
                    e.to_string(),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status_code, body));

            return Err(AppError::LlmError {
                message,
                status_code,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse LLM response: {}", e)))?;

        let content_str = chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| AppError::LlmError {
                message: "Empty response from LLM".into(),
                status_code: 200,
            })?;

        serde_json::from_str(strip_code_fence(content_str)).map_err(|e| AppError::LlmError {
            message: format!("LLM returned invalid JSON: {e}. Raw: {content_str}"),
            status_code: 200,
        })
    }
}
