use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use scrapeaid_core::error::AppError;
use scrapeaid_core::traits::Fetcher;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const USER_AGENT: &str = concat!("scrapeaid/", env!("CARGO_PKG_VERSION"));

/// Plain HTTP fetcher using reqwest.
///
/// Downloads raw HTML directly from the target. Used by the smart scraper
/// when the source is a URL.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        send_for_text(self.client.get(url), self.timeout_secs).await
    }
}

/// Sends `request` and returns the decoded body of a 2xx response.
///
/// Transport failures and non-success statuses become [`AppError`]s; nothing
/// is retried.
pub(crate) async fn send_for_text(
    request: RequestBuilder,
    timeout_secs: u64,
) -> Result<String, AppError> {
    let response = request.send().await.map_err(|e| {
        AppError::from_transport(e.is_timeout(), e.is_connect(), timeout_secs, e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::HttpError(format!(
            "HTTP {} for {}",
            status.as_u16(),
            response.url()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
}
