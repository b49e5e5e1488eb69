//! Scraper workers: drain the fetch queue into the extract queue

use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::crawler::WorkerSummary;
use crate::frontier::FrontierStore;
use crate::url::CanonicalUrl;
use std::sync::Arc;
use std::time::Duration;

/// Fetches one URL and hands the page to the extract queue
///
/// Returns the final URL after redirects. The page is keyed by that final
/// URL, not by the URL that was queued.
pub async fn scrape_one(
    store: &FrontierStore,
    fetcher: &dyn PageFetcher,
    url: &CanonicalUrl,
) -> Result<String, FetchError> {
    let page = fetcher.fetch(url.as_str()).await?;
    let final_url = page.url.clone();

    if !store.push_unextracted(page) {
        tracing::debug!(url = %final_url, "Page fetched after shutdown, discarded");
    }

    Ok(final_url)
}

/// Runs one scraper worker until shutdown is signalled
///
/// Each iteration waits at most `poll_timeout` for a URL. A failed fetch is
/// logged and the URL is dropped; the loop always continues.
pub async fn run_scraper(
    id: usize,
    store: Arc<FrontierStore>,
    fetcher: Arc<dyn PageFetcher>,
    poll_timeout: Duration,
) -> WorkerSummary {
    let mut summary = WorkerSummary::scraper(id);
    tracing::debug!(worker = id, "Scraper started");

    while !store.is_shutdown() {
        let Some(url) = store.pop_unsearched(poll_timeout).await else {
            continue;
        };

        match scrape_one(&store, fetcher.as_ref(), &url).await {
            Ok(final_url) => {
                summary.handled += 1;
                tracing::info!(worker = id, url = %final_url, "Scraper {} scraped: {}", id, final_url);
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(worker = id, url = %url, "Scraper {} had an error scraping {}: {}", id, url, e);
            }
        }
    }

    tracing::debug!(worker = id, "Scraper stopped");
    summary
}
