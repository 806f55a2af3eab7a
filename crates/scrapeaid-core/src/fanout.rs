use crate::error::AppError;
use crate::models::{ContentMode, DispatchMode};
use crate::traits::PageLoader;

/// Loads every URL through `loader` and returns the pages in input order.
///
/// In [`DispatchMode::Concurrent`] each load is spawned onto the tokio
/// runtime. All tasks are awaited before returning, even when one of them
/// fails; the error reported is the first one in input order.
pub async fn load_all<L: PageLoader>(
    loader: &L,
    urls: &[String],
    mode: ContentMode,
    dispatch: DispatchMode,
) -> Result<Vec<String>, AppError> {
    tracing::info!(count = urls.len(), ?mode, ?dispatch, "Loading pages");

    match dispatch {
        DispatchMode::Sequential => {
            let mut pages = Vec::with_capacity(urls.len());
            for url in urls {
                pages.push(loader.load(url, mode).await?);
            }
            Ok(pages)
        }
        DispatchMode::Concurrent => {
            let handles: Vec<_> = urls
                .iter()
                .map(|url| {
                    let loader = loader.clone();
                    let url = url.clone();
                    tokio::spawn(async move { loader.load(&url, mode).await })
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for handle in handles {
                let outcome = handle
                    .await
                    .unwrap_or_else(|e| Err(AppError::Generic(format!("Load task failed: {e}"))));
                outcomes.push(outcome);
            }

            outcomes.into_iter().collect()
        }
    }
}
