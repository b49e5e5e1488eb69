//! Extractor workers: turn fetched pages into plain text and new frontier URLs

use crate::crawler::parser::{extract_links, extract_text};
use crate::crawler::WorkerSummary;
use crate::frontier::FrontierStore;
use crate::page::{ExtractedPage, FetchedPage};
use crate::url::{canonicalize, label};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page URL {url} is not absolute: {source}")]
    InvalidPageUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Extraction task for {url} failed: {message}")]
    TaskFailed { url: String, message: String },
}

/// What one extraction produced
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub page: ExtractedPage,

    /// Anchors found on the page that could be resolved
    pub links_found: usize,

    /// Links that passed filtering and were newly claimed
    pub links_added: usize,

    /// Finished-page count after this page
    pub finished: u64,
}

/// Extracts one page and feeds its new links back into the frontier
///
/// For each anchor, in document order:
/// 1. canonicalize against the page URL (unparseable links are skipped)
/// 2. skip unless the link is accepted by extension, scope and blacklist filters
/// 3. claim it in the seen set; only the first claimant continues
/// 4. record its description (anchor text, else a label derived from the URL)
///    and queue it for fetching
///
/// The finished-page counter is incremented once the page is processed.
pub fn extract_page(store: &FrontierStore, page: FetchedPage) -> Result<PageOutcome, ExtractError> {
    let base = url::Url::parse(&page.url).map_err(|source| ExtractError::InvalidPageUrl {
        url: page.url.clone(),
        source,
    })?;

    let plaintext = extract_text(&page.html);
    let links = extract_links(&page.html, &base);
    let links_found = links.len();
    let mut links_added = 0;

    for link in links {
        let canonical = match canonicalize(link.url.as_str(), None, store.scheme_distinct()) {
            Ok(canonical) => canonical,
            Err(e) => {
                tracing::trace!(url = %link.url, "Skipping link: {}", e);
                continue;
            }
        };

        let verdict = store.classify(&canonical);
        if !verdict.is_accepted() {
            tracing::trace!(url = %canonical, ?verdict, "Link filtered");
            continue;
        }

        if !store.add_to_seen(&canonical) {
            continue;
        }

        let description = link.text.unwrap_or_else(|| label(canonical.as_str()));
        store.record_discovery(&canonical, &description);
        store.push_unsearched(canonical);
        links_added += 1;
    }

    let finished = store.increment_finished();

    Ok(PageOutcome {
        page: page.into_extracted(plaintext),
        links_found,
        links_added,
        finished,
    })
}

/// Runs one extractor worker until shutdown is signalled
///
/// Parsing is CPU-bound, so each page is processed on the blocking pool.
/// A page that fails is logged and dropped.
pub async fn run_extractor(
    id: usize,
    store: Arc<FrontierStore>,
    poll_timeout: Duration,
) -> WorkerSummary {
    let mut summary = WorkerSummary::extractor(id);
    tracing::debug!(worker = id, "Extractor started");

    while !store.is_shutdown() {
        let Some(page) = store.pop_unextracted(poll_timeout).await else {
            continue;
        };
        let url = page.url.clone();

        let task_store = store.clone();
        let result = tokio::task::spawn_blocking(move || extract_page(&task_store, page))
            .await
            .unwrap_or_else(|e| {
                Err(ExtractError::TaskFailed {
                    url: url.clone(),
                    message: e.to_string(),
                })
            });

        match result {
            Ok(outcome) => {
                summary.handled += 1;
                tracing::info!(
                    worker = id,
                    url = %url,
                    "Extractor {} extracted {}: {} links, {} new (finished pages: {})",
                    id,
                    url,
                    outcome.links_found,
                    outcome.links_added,
                    outcome.finished
                );
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(worker = id, url = %url, "Extractor {} had an error extracting {}: {}", id, url, e);
            }
        }
    }

    tracing::debug!(worker = id, "Extractor stopped");
    summary
}
