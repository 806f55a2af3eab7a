pub mod config;
pub mod error;
pub mod fanout;
pub mod models;
pub mod smart;
#[cfg(test)]
pub mod testutil;
pub mod traits;

pub use config::OpenAiConfig;
pub use error::AppError;
pub use fanout::load_all;
pub use models::{
    ContentMode, DispatchMode, ProxyOptions, ScrapeDoMode, SmartScrapeResult, SmartScrapeSource,
};
pub use smart::SmartScraper;
pub use traits::{Cleaner, Extractor, Fetcher, PageLoader};
