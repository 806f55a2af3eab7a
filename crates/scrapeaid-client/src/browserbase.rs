//! Browserbase adapter.
//!
//! The CDP client is an optional dependency behind the `browserbase` cargo
//! feature. Builds without it still expose [`browser_base_fetch`], which
//! then fails up front with [`AppError::MissingDependency`].

#[cfg(feature = "browserbase")]
mod loader;

#[cfg(feature = "browserbase")]
pub use loader::BrowserbaseLoader;

use scrapeaid_core::error::AppError;
use scrapeaid_core::models::{ContentMode, DispatchMode};

pub const FEATURE: &str = "browserbase";
const INSTALL_HINT: &str =
    "Rebuild with `cargo build --features browserbase` to enable Browserbase loading.";

/// Whether this build can talk to Browserbase.
pub const fn is_available() -> bool {
    cfg!(feature = "browserbase")
}

/// Loads every link through Browserbase and returns the pages in input order.
///
/// `mode` selects rendered text vs full markup; `dispatch` selects one load
/// at a time vs all loads in flight at once. Errors from Browserbase are
/// returned unchanged.
pub async fn browser_base_fetch(
    api_key: &str,
    project_id: &str,
    links: &[String],
    mode: ContentMode,
    dispatch: DispatchMode,
) -> Result<Vec<String>, AppError> {
    #[cfg(feature = "browserbase")]
    {
        let loader = BrowserbaseLoader::new(api_key, project_id)?;
        scrapeaid_core::fanout::load_all(&loader, links, mode, dispatch).await
    }

    #[cfg(not(feature = "browserbase"))]
    {
        let _ = (api_key, project_id, links, mode, dispatch);
        Err(missing())
    }
}

#[cfg_attr(feature = "browserbase", allow(dead_code))]
fn missing() -> AppError {
    AppError::MissingDependency {
        feature: FEATURE,
        hint: INSTALL_HINT,
    }
}
