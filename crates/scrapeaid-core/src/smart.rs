use crate::error::AppError;
use crate::models::{SmartScrapeResult, SmartScrapeSource};
use crate::traits::{Cleaner, Extractor, Fetcher};

/// Answers a prompt about a page: fetch → clean → ask the LLM.
///
/// Generic over all external dependencies via traits, enabling dependency injection
/// and testability without real HTTP or LLM calls.
pub struct SmartScraper<F, C, E>
where
    F: Fetcher,
    C: Cleaner,
    E: Extractor,
{
    fetcher: F,
    cleaner: C,
    extractor: E,
}

impl<F, C, E> SmartScraper<F, C, E>
where
    F: Fetcher,
    C: Cleaner,
    E: Extractor,
{
    pub fn new(fetcher: F, cleaner: C, extractor: E) -> Self {
        Self {
            fetcher,
            cleaner,
            extractor,
        }
    }

    /// Run the pipeline for a prompt + source.
    ///
    /// 1. Fetch HTML when the source is a URL; raw HTML is used as-is
    /// 2. Clean the HTML
    /// 3. Ask the extractor to answer the prompt from the cleaned content
    pub async fn run(
        &self,
        prompt: &str,
        source: &SmartScrapeSource,
    ) -> Result<SmartScrapeResult, AppError> {
        // 1. Resolve source
        let html = match source {
            SmartScrapeSource::Url(url) => {
                tracing::info!("Fetching {}", url);
                let html = self.fetcher.fetch(url).await?;
                tracing::info!("Fetched {} bytes of HTML", html.len());
                html
            }
            SmartScrapeSource::Html(html) => html.clone(),
        };

        // 2. Clean
        let cleaned = self.cleaner.clean(&html)?;
        tracing::info!(
            "Cleaned to {} bytes ({}% reduction)",
            cleaned.len(),
            if html.is_empty() {
                0
            } else {
                100usize.saturating_sub(cleaned.len() * 100 / html.len())
            }
        );

        // 3. Extract
        let answer = self.extractor.extract(prompt, &cleaned).await?;
        tracing::info!("Smart scrape complete");

        Ok(SmartScrapeResult {
            answer,
            source_bytes: html.len(),
            cleaned_bytes: cleaned.len(),
        })
    }
}
