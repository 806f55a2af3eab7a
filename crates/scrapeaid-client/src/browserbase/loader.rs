use chromiumoxide::Browser;
use futures::StreamExt;
use reqwest::Client;
use scrapeaid_core::error::AppError;
use scrapeaid_core::models::ContentMode;
use scrapeaid_core::traits::PageLoader;
use serde::{Deserialize, Serialize};

use crate::fetcher::USER_AGENT;

const DEFAULT_API_BASE: &str = "https://api.browserbase.com";
const CONNECT_BASE: &str = "wss://connect.browserbase.com";

/// Page title and visible body text.
const TEXT_SCRIPT: &str =
    "(document.title || '') + '\\n' + (document.body ? document.body.innerText : '')";

/// Remote-browser loader backed by Browserbase.
///
/// Every [`PageLoader::load`] call creates a fresh Browserbase session,
/// attaches to it over the Chrome DevTools Protocol, renders the page and
/// closes the connection. Clones share the HTTP client and credentials, so a
/// single loader can serve concurrent loads. No timeout is applied: a
/// stalled page stalls the load.
#[derive(Clone)]
pub struct BrowserbaseLoader {
    http: Client,
    api_key: String,
    project_id: String,
    api_base: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSession<'a> {
    project_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    id: String,
    connect_url: Option<String>,
}

impl BrowserbaseLoader {
    pub fn new(
        api_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            project_id: project_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    async fn create_session(&self) -> Result<Session, AppError> {
        let url = format!("{}/v1/sessions", self.api_base);
        let response = self
            .http
            .post(&url)
            .header("X-BB-API-Key", &self.api_key)
            .json(&CreateSession {
                project_id: &self.project_id,
            })
            .send()
            .await
            .map_err(|e| {
                AppError::from_transport(e.is_timeout(), e.is_connect(), 0, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::HttpError(format!(
                "Browserbase session creation failed (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse session response: {e}")))?;
        tracing::debug!(session_id = %session.id, "Browserbase session created");
        Ok(session)
    }

    fn connect_url(&self, session: &Session) -> String {
        session.connect_url.clone().unwrap_or_else(|| {
            format!(
                "{CONNECT_BASE}?apiKey={}&sessionId={}",
                self.api_key, session.id
            )
        })
    }

    async fn render(browser: &Browser, url: &str, mode: ContentMode) -> Result<String, AppError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| AppError::BrowserError(format!("Failed to navigate to {url}: {e}")))?;

        page.find_element("body")
            .await
            .map_err(|e| AppError::BrowserError(format!("Page did not render body: {e}")))?;

        let content = match mode {
            ContentMode::Html => page.content().await.map_err(|e| {
                AppError::BrowserError(format!("Failed to read page content: {e}"))
            })?,
            ContentMode::Text => page
                .evaluate(TEXT_SCRIPT)
                .await
                .map_err(|e| AppError::BrowserError(format!("Failed to read page text: {e}")))?
                .into_value::<String>()?,
        };

        let _ = page.close().await;
        Ok(content)
    }
}

impl PageLoader for BrowserbaseLoader {
    async fn load(&self, url: &str, mode: ContentMode) -> Result<String, AppError> {
        tracing::info!(%url, ?mode, "Loading page through Browserbase");
        let session = self.create_session().await?;

        let (mut browser, mut handler) = Browser::connect(self.connect_url(&session))
            .await
            .map_err(|e| AppError::BrowserError(format!("CDP connection failed: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browserbase CDP handler error: {event:?}");
                    break;
                }
            }
        });

        let result = Self::render(&browser, url, mode).await;

        let _ = browser.close().await;
        handler_task.abort();

        result
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    #[tokio::test]
    async fn test_create_session_sends_project_and_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/sessions")
                    .header("X-BB-API-Key", "bb-key")
                    .json_body(serde_json::json!({"projectId": "proj-1"}));
                then.status(201).json_body(serde_json::json!({
                    "id": "sess-42",
                    "connectUrl": "wss://connect.example/sess-42"
                }));
            })
            .await;

        let loader = BrowserbaseLoader::new("bb-key", "proj-1")
            .unwrap()
            .with_api_base(server.base_url());
        let session = loader.create_session().await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.id, "sess-42");
        assert_eq!(loader.connect_url(&session), "wss://connect.example/sess-42");
    }

    #[tokio::test]
    async fn test_connect_url_falls_back_to_session_id() {
        let loader = BrowserbaseLoader::new("bb-key", "proj-1").unwrap();
        let session = Session {
            id: "sess-7".into(),
            connect_url: None,
        };
        assert_eq!(
            loader.connect_url(&session),
            "wss://connect.browserbase.com?apiKey=bb-key&sessionId=sess-7"
        );
    }

    #[tokio::test]
    async fn test_session_error_propagates_before_connecting() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/sessions");
                then.status(401).body("unauthorized");
            })
            .await;

        let loader = BrowserbaseLoader::new("bad", "proj-1")
            .unwrap()
            .with_api_base(server.base_url());
        let err = loader
            .load("https://example.com", ContentMode::Html)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::HttpError(ref m) if m.contains("HTTP 401")));
    }
}
