use std::time::Duration;

use reqwest::{Client, Proxy};
use scrapeaid_core::error::AppError;
use scrapeaid_core::models::{ProxyOptions, ScrapeDoMode};
use scrapeaid_core::traits::Fetcher;
use url::Url;

use crate::fetcher::{USER_AGENT, send_for_text};

pub const API_BASE: &str = "http://api.scrape.do/";
pub const PROXY_ENDPOINT: &str = "proxy.scrape.do:8080";

/// Fetcher backed by the Scrape.do service.
///
/// In [`ScrapeDoMode::Api`] the target is passed to the hosted API as a
/// query parameter. In [`ScrapeDoMode::Proxy`] the target is requested
/// directly through the Scrape.do proxy, authenticated with the token, and
/// certificate validation is disabled because the proxy re-signs TLS.
///
/// Requests have no timeout unless one is set with
/// [`with_timeout`](Self::with_timeout); a stalled page stalls the call.
#[derive(Clone)]
pub struct ScrapeDoFetcher {
    client: Client,
    token: String,
    mode: ScrapeDoMode,
    api_base: Url,
    proxy_endpoint: String,
    timeout: Option<Duration>,
}

impl ScrapeDoFetcher {
    pub fn new(token: impl Into<String>, mode: ScrapeDoMode) -> Result<Self, AppError> {
        let token = token.into();
        let client = build_client(&token, &mode, PROXY_ENDPOINT, None)?;
        let api_base = Url::parse(API_BASE)
            .map_err(|e| AppError::ConfigError(format!("Invalid API base: {e}")))?;

        Ok(Self {
            client,
            token,
            mode,
            api_base,
            proxy_endpoint: PROXY_ENDPOINT.to_string(),
            timeout: None,
        })
    }

    /// Gives up on requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AppError> {
        self.timeout = Some(timeout);
        self.rebuild()
    }

    /// Points API mode at a different host (a local mock server in tests).
    pub fn with_api_base(mut self, base: &str) -> Result<Self, AppError> {
        self.api_base = Url::parse(base)
            .map_err(|e| AppError::ConfigError(format!("Invalid API base '{base}': {e}")))?;
        Ok(self)
    }

    /// Routes proxy mode through `host:port` instead of the Scrape.do proxy.
    pub fn with_proxy_endpoint(mut self, endpoint: &str) -> Result<Self, AppError> {
        self.proxy_endpoint = endpoint.to_string();
        self.rebuild()
    }

    /// The request URL this fetcher would use for `target`.
    pub fn request_url(&self, target: &str) -> Result<Url, AppError> {
        match &self.mode {
            ScrapeDoMode::Api => Ok(api_request_url(&self.api_base, &self.token, target)),
            ScrapeDoMode::Proxy(opts) => proxied_target_url(target, opts),
        }
    }

    fn rebuild(mut self) -> Result<Self, AppError> {
        self.client = build_client(&self.token, &self.mode, &self.proxy_endpoint, self.timeout)?;
        Ok(self)
    }
}

impl Fetcher for ScrapeDoFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let request_url = self.request_url(url)?;
        let mode = match self.mode {
            ScrapeDoMode::Api => "api",
            ScrapeDoMode::Proxy(_) => "proxy",
        };
        tracing::info!(target_url = %url, %mode, "Fetching through Scrape.do");

        let timeout_secs = self.timeout.map_or(0, |t| t.as_secs());
        send_for_text(self.client.get(request_url), timeout_secs).await
    }
}

/// One-shot convenience wrapper: build a [`ScrapeDoFetcher`] and fetch `target_url`.
pub async fn scrape_do_fetch(
    token: &str,
    target_url: &str,
    mode: ScrapeDoMode,
) -> Result<String, AppError> {
    ScrapeDoFetcher::new(token, mode)?.fetch(target_url).await
}

/// `http://{token}@{endpoint}` with the token percent-encoded as the proxy
/// user, used for both http and https targets.
pub fn proxy_url(endpoint: &str, token: &str) -> Result<Url, AppError> {
    let mut url = Url::parse(&format!("http://{endpoint}")).map_err(|e| {
        AppError::ConfigError(format!("Invalid proxy endpoint '{endpoint}': {e}"))
    })?;
    url.set_username(token)
        .map_err(|_| AppError::ConfigError(format!("Proxy endpoint '{endpoint}' has no host")))?;
    Ok(url)
}

fn build_client(
    token: &str,
    mode: &ScrapeDoMode,
    proxy_endpoint: &str,
    timeout: Option<Duration>,
) -> Result<Client, AppError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    if matches!(mode, ScrapeDoMode::Proxy(_)) {
        let proxy = Proxy::all(proxy_url(proxy_endpoint, token)?.as_str())
            .map_err(|e| AppError::ConfigError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy).danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| AppError::HttpError(e.to_string()))
}

/// `{base}?token={token}&url={urlencoded target}`.
fn api_request_url(base: &Url, token: &str, target: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("token", token)
        .append_pair("url", target);
    url
}

fn proxied_target_url(target: &str, opts: &ProxyOptions) -> Result<Url, AppError> {
    let mut url =
        Url::parse(target).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;
    let params = opts.query_params();
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
