pub mod browserbase;
pub mod cleaner;
pub mod fetcher;
pub mod llm;
pub mod minify;
pub mod scrape_do;

#[cfg(feature = "browserbase")]
pub use browserbase::BrowserbaseLoader;
pub use browserbase::browser_base_fetch;
pub use cleaner::MarkdownCleaner;
pub use fetcher::ReqwestFetcher;
pub use llm::OpenAiExtractor;
pub use minify::{HtmlMinifier, minify_html};
pub use scrape_do::{ScrapeDoFetcher, scrape_do_fetch};
