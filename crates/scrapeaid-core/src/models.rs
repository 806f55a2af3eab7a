use serde::{Deserialize, Serialize};

/// What a browser load returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Page title plus the rendered body text.
    #[default]
    Text,
    /// Full rendered markup.
    Html,
}

/// How a list of targets is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// One load at a time, in input order.
    #[default]
    Sequential,
    /// Every load spawned at once; results still come back in input order.
    Concurrent,
}

/// Geolocation settings for Scrape.do proxy mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyOptions {
    /// ISO country code, e.g. `"us"`. When `None` no query parameters are sent.
    pub geo_code: Option<String>,
    /// Route through the residential & mobile proxy network.
    pub super_proxy: bool,
}

impl ProxyOptions {
    /// Query parameters to append to the target URL.
    ///
    /// `super` is only meaningful together with a geo code, so both are
    /// omitted when no geo code is set.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match &self.geo_code {
            Some(code) => vec![
                ("geoCode", code.clone()),
                ("super", self.super_proxy.to_string()),
            ],
            None => Vec::new(),
        }
    }
}

/// Whether a Scrape.do fetch goes through the hosted API or the proxy endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScrapeDoMode {
    #[default]
    Api,
    Proxy(ProxyOptions),
}

/// Input for the smart scraper: a page to fetch, or markup already in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmartScrapeSource {
    Url(String),
    Html(String),
}

impl SmartScrapeSource {
    /// Anything starting with `http://` or `https://` is treated as a URL.
    pub fn detect(source: impl Into<String>) -> Self {
        let source = source.into();
        let trimmed = source.trim_start();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            SmartScrapeSource::Url(trimmed.trim_end().to_string())
        } else {
            SmartScrapeSource::Html(source)
        }
    }
}

/// Output of a smart scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct SmartScrapeResult {
    /// JSON answer returned by the LLM.
    pub answer: serde_json::Value,
    pub source_bytes: usize,
    pub cleaned_bytes: usize,
}
