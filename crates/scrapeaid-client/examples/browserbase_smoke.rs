/// Smoke-test for `browser_base_fetch`.
///
/// Loads <https://example.com> twice through Browserbase, once as text and
/// once as HTML with concurrent dispatch, and checks the expected heading.
///
/// Run with:
///   BROWSERBASE_API_KEY=... BROWSERBASE_PROJECT_ID=... \
///   cargo run --example browserbase_smoke --features browserbase
use anyhow::Context;
use scrapeaid_client::browser_base_fetch;
use scrapeaid_core::{ContentMode, DispatchMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let api_key = std::env::var("BROWSERBASE_API_KEY").context("BROWSERBASE_API_KEY not set")?;
    let project_id =
        std::env::var("BROWSERBASE_PROJECT_ID").context("BROWSERBASE_PROJECT_ID not set")?;
    let links = vec!["https://example.com".to_string()];

    let text = browser_base_fetch(
        &api_key,
        &project_id,
        &links,
        ContentMode::Text,
        DispatchMode::Sequential,
    )
    .await?;
    assert!(text[0].contains("Example Domain"), "Expected title not found in text");
    println!("Text mode OK ({} bytes)", text[0].len());

    let links = vec![links[0].clone(), links[0].clone()];
    let html = browser_base_fetch(
        &api_key,
        &project_id,
        &links,
        ContentMode::Html,
        DispatchMode::Concurrent,
    )
    .await?;
    assert_eq!(html.len(), 2);
    assert!(
        html.iter().all(|page| page.contains("<h1>Example Domain</h1>")),
        "Expected <h1> not found in rendered HTML"
    );
    println!("HTML mode OK — got {} pages", html.len());
    Ok(())
}
