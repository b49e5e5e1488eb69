//! The shared frontier and dedup store
//!
//! Every worker coordinates through one [`FrontierStore`]. It owns the seen
//! set, both work queues, the discovered-URL index, the finished counter and
//! the shutdown signal. Nothing outside this type touches those collections.

use crate::frontier::queue::WorkQueue;
use crate::page::FetchedPage;
use crate::url::{self, CanonicalUrl, LinkVerdict};
use crate::{UrlError, UrlResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Point-in-time sizes of the store, used for sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct StoreSnapshot {
    pub seen: usize,
    pub frontier_depth: usize,
    pub extract_queue_depth: usize,
    pub finished: u64,
}

/// Shared crawl state
///
/// The seen set, discovered index and finished counter each sit behind their
/// own critical section. Queues are unbounded.
#[derive(Debug)]
pub struct FrontierStore {
    seen: Mutex<HashSet<String>>,
    /// Dedup key -> (URL as first discovered, description)
    discovered: Mutex<HashMap<String, (String, String)>>,
    finished: AtomicU64,
    unsearched: WorkQueue<CanonicalUrl>,
    unextracted: WorkQueue<FetchedPage>,
    shutdown: CancellationToken,
    root_domain: RwLock<Option<String>>,
    blacklist: Vec<String>,
    scheme_distinct: bool,
}

impl FrontierStore {
    /// Creates an empty store
    ///
    /// # Arguments
    ///
    /// * `blacklist` - Hosts that are never queued (exact, case-insensitive)
    /// * `scheme_distinct` - Treat `http` and `https` variants as different URLs
    pub fn new(blacklist: Vec<String>, scheme_distinct: bool) -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
            discovered: Mutex::new(HashMap::new()),
            finished: AtomicU64::new(0),
            unsearched: WorkQueue::new(),
            unextracted: WorkQueue::new(),
            shutdown: CancellationToken::new(),
            root_domain: RwLock::new(None),
            blacklist: blacklist.into_iter().map(|h| h.to_lowercase()).collect(),
            scheme_distinct,
        }
    }

    pub fn scheme_distinct(&self) -> bool {
        self.scheme_distinct
    }

    pub fn blacklist(&self) -> &[String] {
        &self.blacklist
    }

    /// Canonicalizes a raw URL with this store's scheme setting
    pub fn canonicalize(&self, raw: &str) -> UrlResult<CanonicalUrl> {
        url::canonicalize(raw, None, self.scheme_distinct)
    }

    // ===== Fetch queue =====

    /// Queues a URL for fetching
    ///
    /// Returns false, and queues nothing, once shutdown has been signalled.
    pub fn push_unsearched(&self, url: CanonicalUrl) -> bool {
        let label = url.to_string();
        let queued = self.unsearched.push(url);
        if !queued {
            tracing::debug!(url = %label, "Shutdown signalled, not queueing URL");
        }
        queued
    }

    /// Takes the next URL to fetch, waiting up to `timeout`
    ///
    /// Returns `None` on timeout or as soon as shutdown is signalled.
    pub async fn pop_unsearched(&self, timeout: Duration) -> Option<CanonicalUrl> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => None,
            url = self.unsearched.pop(timeout) => url,
        }
    }

    // ===== Extract queue =====

    /// Queues a fetched page for extraction
    ///
    /// Returns false, and queues nothing, once shutdown has been signalled.
    pub fn push_unextracted(&self, page: FetchedPage) -> bool {
        let label = page.url.clone();
        let queued = self.unextracted.push(page);
        if !queued {
            tracing::debug!(url = %label, "Shutdown signalled, not queueing page");
        }
        queued
    }

    /// Takes the next page to extract, waiting up to `timeout`
    ///
    /// Returns `None` on timeout or as soon as shutdown is signalled.
    pub async fn pop_unextracted(&self, timeout: Duration) -> Option<FetchedPage> {
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => None,
            page = self.unextracted.pop(timeout) => page,
        }
    }

    // ===== Dedup and discovery =====

    /// Claims a URL for scheduling
    ///
    /// Returns true only for the first caller to insert this URL's key; every
    /// later or concurrent caller gets false. The seen set never shrinks.
    pub fn add_to_seen(&self, url: &CanonicalUrl) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.key().to_string())
    }

    /// Returns true if the URL's key has been claimed
    pub fn is_seen(&self, url: &CanonicalUrl) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url.key())
    }

    /// Records a description for a URL, keeping the first one written
    ///
    /// Returns true if this call stored the description. URLs that were never
    /// claimed through [`add_to_seen`](Self::add_to_seen) are refused, so the
    /// discovered index stays a subset of the seen set.
    pub fn record_discovery(&self, url: &CanonicalUrl, description: &str) -> bool {
        if !self.is_seen(url) {
            tracing::debug!(url = %url, "Refusing discovery for unclaimed URL");
            return false;
        }

        let mut discovered = self
            .discovered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if discovered.contains_key(url.key()) {
            return false;
        }
        discovered.insert(
            url.key().to_string(),
            (url.as_str().to_string(), description.to_string()),
        );
        true
    }

    /// Returns all discovered URLs and their descriptions, sorted by URL
    pub fn discoveries(&self) -> Vec<(String, String)> {
        let discovered = self
            .discovered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<(String, String)> = discovered.values().cloned().collect();
        entries.sort();
        entries
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // ===== Counters =====

    /// Counts one fully extracted page, returning the new total
    pub fn increment_finished(&self) -> u64 {
        self.finished.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn finished_count(&self) -> u64 {
        self.finished.load(Ordering::SeqCst)
    }

    // ===== Shutdown =====

    /// Sets the shutdown signal; it is never cleared
    ///
    /// Both queues are closed before the token is cancelled, so no push can
    /// land once this returns.
    pub fn signal_shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::info!("Shutdown signalled");
        }
        self.unsearched.close();
        self.unextracted.close();
        self.shutdown.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// A token that is cancelled when shutdown is signalled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    // ===== Scope =====

    /// Sets the crawl's root registrable domain from a URL and returns it
    pub fn set_root_domain(&self, url: &str) -> UrlResult<String> {
        let domain = url::url_registrable_domain(url).ok_or(UrlError::MissingDomain)?;
        *self
            .root_domain
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(domain.clone());
        Ok(domain)
    }

    pub fn root_domain(&self) -> Option<String> {
        self.root_domain
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Checks a URL against the root domain; everything is in scope until one is set
    pub fn in_scope(&self, url: &str) -> bool {
        match self.root_domain().as_deref() {
            Some(root) => url::in_scope(url, root),
            None => true,
        }
    }

    pub fn is_blacklisted(&self, url: &str) -> bool {
        url::is_blacklisted(url, &self.blacklist)
    }

    /// Runs a link through the extension, scope and blacklist filters
    pub fn classify(&self, link: &CanonicalUrl) -> LinkVerdict {
        url::classify_link(link, self.root_domain().as_deref(), &self.blacklist)
    }

    // ===== Sizes =====

    pub fn seen_count(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn frontier_depth(&self) -> usize {
        self.unsearched.len()
    }

    pub fn extract_queue_depth(&self) -> usize {
        self.unextracted.len()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            seen: self.seen_count(),
            frontier_depth: self.frontier_depth(),
            extract_queue_depth: self.extract_queue_depth(),
            finished: self.finished_count(),
        }
    }

    /// Liveness probe for remote callers
    pub fn ping(&self) -> bool {
        true
    }
}
