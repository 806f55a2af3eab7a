use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scrapeaid_client::{
    MarkdownCleaner, OpenAiExtractor, ReqwestFetcher, browser_base_fetch, minify_html,
    scrape_do_fetch,
};
use scrapeaid_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use scrapeaid_core::{
    ContentMode, DispatchMode, ProxyOptions, ScrapeDoMode, SmartScrapeSource, SmartScraper,
};

#[derive(Parser)]
#[command(name = "scrapeaid", version, about = "Small scraping helpers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Minify HTML from a file (or stdin) and print it
    Minify {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Fetch a page through Scrape.do
    Fetch {
        /// Target URL
        #[arg(short, long)]
        url: String,

        /// Scrape.do API token
        #[arg(short, long, env = "SCRAPEDO_TOKEN")]
        token: String,

        /// Route through the Scrape.do proxy instead of the hosted API
        #[arg(long, default_value_t = false)]
        proxy: bool,

        /// Country code for geolocated proxies (proxy mode only)
        #[arg(long, requires = "proxy")]
        geo_code: Option<String>,

        /// Use the residential & mobile proxy network (proxy mode only)
        #[arg(long, default_value_t = false, requires = "geo_code")]
        super_proxy: bool,
    },

    /// Load pages through Browserbase and print them as a JSON array
    Browse {
        /// Target URLs (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// Browserbase API key
        #[arg(long, env = "BROWSERBASE_API_KEY")]
        api_key: String,

        /// Browserbase project id
        #[arg(long, env = "BROWSERBASE_PROJECT_ID")]
        project_id: String,

        /// Return full HTML instead of page text
        #[arg(long, default_value_t = false)]
        html: bool,

        /// Load all URLs at once instead of one after another
        #[arg(long, default_value_t = false)]
        concurrent: bool,
    },

    /// Answer a prompt about a page using an LLM
    Smart {
        /// What to extract, in plain language
        #[arg(short, long)]
        prompt: String,

        /// URL to fetch, or a path to a saved HTML file
        #[arg(short, long)]
        source: String,

        /// LLM model to use
        #[arg(short, long, env = "SCRAPEAID_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        /// OpenAI-compatible API base URL
        #[arg(short, long, env = "SCRAPEAID_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// API key
        #[arg(short, long, env = "OPENAI_APIKEY")]
        api_key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scrapeaid=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Minify { file } => cmd_minify(file.as_deref())?,
        Commands::Fetch {
            url,
            token,
            proxy,
            geo_code,
            super_proxy,
        } => {
            let mode = if proxy {
                ScrapeDoMode::Proxy(ProxyOptions {
                    geo_code,
                    super_proxy,
                })
            } else {
                ScrapeDoMode::Api
            };
            let body = scrape_do_fetch(&token, &url, mode)
                .await
                .with_context(|| format!("Scrape.do fetch failed for {url}"))?;
            println!("{body}");
        }
        Commands::Browse {
            urls,
            api_key,
            project_id,
            html,
            concurrent,
        } => {
            let mode = if html {
                ContentMode::Html
            } else {
                ContentMode::Text
            };
            let dispatch = if concurrent {
                DispatchMode::Concurrent
            } else {
                DispatchMode::Sequential
            };
            let pages = browser_base_fetch(&api_key, &project_id, &urls, mode, dispatch).await?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Commands::Smart {
            prompt,
            source,
            model,
            base_url,
            api_key,
        } => cmd_smart(&prompt, &source, &model, &base_url, &api_key).await?,
    }

    Ok(())
}

fn cmd_minify(file: Option<&Path>) -> Result<()> {
    let html = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let minified = minify_html(&html);
    tracing::info!("Minified {} -> {} bytes", html.len(), minified.len());
    println!("{minified}");
    Ok(())
}

async fn cmd_smart(
    prompt: &str,
    source: &str,
    model: &str,
    base_url: &str,
    api_key: &str,
) -> Result<()> {
    let source = resolve_source(source)?;

    let fetcher = ReqwestFetcher::new().context("Failed to create HTTP client")?;
    let extractor = OpenAiExtractor::new(api_key, model, base_url)?;
    let scraper = SmartScraper::new(fetcher, MarkdownCleaner::new(), extractor);

    tracing::info!("Asking {} ...", model);
    let result = scraper.run(prompt, &source).await?;

    println!("{}", serde_json::to_string_pretty(&result.answer)?);
    Ok(())
}

/// A URL is fetched; an existing file is read as HTML; anything else is
/// treated as inline HTML.
fn resolve_source(source: &str) -> Result<SmartScrapeSource> {
    match SmartScrapeSource::detect(source) {
        SmartScrapeSource::Url(url) => Ok(SmartScrapeSource::Url(url)),
        SmartScrapeSource::Html(raw) => {
            let path = Path::new(&raw);
            if path.is_file() {
                let html = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(SmartScrapeSource::Html(html))
            } else {
                Ok(SmartScrapeSource::Html(raw))
            }
        }
    }
}
