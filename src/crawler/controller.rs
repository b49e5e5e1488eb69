//! Crawl lifecycle controller
//!
//! This module owns a single crawl run from seed to report:
//! - Initializing the store (root domain, blacklist, seed)
//! - Starting the remote-access service when configured
//! - Spawning the scraper and extractor pools
//! - Sampling progress until the run duration elapses or shutdown is requested
//! - Draining the workers and assembling the final report

use crate::config::{Config, ServiceConfig};
use crate::crawler::extractor::run_extractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::phase::Phase;
use crate::crawler::sampler::Timeline;
use crate::crawler::scraper::run_scraper;
use crate::crawler::WorkerSummary;
use crate::frontier::FrontierStore;
use crate::service::{self, ServiceHandle};
use crate::SweepError;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Runtime parameters for one crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub seed: String,
    pub seed_description: String,
    pub run_duration: Duration,
    pub scrapers: usize,
    pub extractors: usize,
    pub sample_interval: Duration,
    pub poll_timeout: Duration,
    pub scheme_distinct: bool,
    pub blacklist: Vec<String>,
}

impl From<&Config> for CrawlSettings {
    fn from(config: &Config) -> Self {
        let crawler = &config.crawler;
        Self {
            seed: crawler.seed.clone(),
            seed_description: crawler.seed_description.clone(),
            run_duration: Duration::from_secs(crawler.run_duration_secs),
            scrapers: crawler.scrapers,
            extractors: crawler.extractors,
            sample_interval: Duration::from_secs(crawler.sample_interval_secs),
            poll_timeout: Duration::from_millis(crawler.poll_timeout_ms),
            scheme_distinct: crawler.scheme_distinct,
            blacklist: config.blacklist_hosts(),
        }
    }
}

/// Everything reporting needs once a run has stopped
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub seed: String,
    pub root_domain: String,
    pub scrapers: usize,
    pub extractors: usize,
    pub finished: u64,
    pub seen_count: usize,

    /// (URL, description) pairs sorted by URL
    pub discoveries: Vec<(String, String)>,
    pub timeline: Timeline,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,

    /// Hash of the config file that produced this run, when loaded from one
    pub config_hash: Option<String>,
}

impl CrawlReport {
    /// Number of distinct URLs discovered, seed included
    pub fn unique_urls(&self) -> usize {
        self.discoveries.len()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Drives one crawl run through its lifecycle
pub struct Controller {
    settings: CrawlSettings,
    store: Arc<FrontierStore>,
    fetcher: Arc<dyn PageFetcher>,
    service: Option<ServiceConfig>,
    config_hash: Option<String>,
    phase: Phase,
}

impl Controller {
    /// Creates a controller with a fresh store
    ///
    /// # Arguments
    ///
    /// * `settings` - Run parameters
    /// * `fetcher` - Transport shared by all scraper workers
    pub fn new(settings: CrawlSettings, fetcher: Arc<dyn PageFetcher>) -> Self {
        let store = Arc::new(FrontierStore::new(
            settings.blacklist.clone(),
            settings.scheme_distinct,
        ));

        Self {
            settings,
            store,
            fetcher,
            service: None,
            config_hash: None,
            phase: Phase::Initializing,
        }
    }

    /// Exposes the store through the remote-access service during the run
    pub fn with_service(mut self, service: ServiceConfig) -> Self {
        self.service = Some(service);
        self
    }

    /// Records the hash of the config that produced this run
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Shared store handle, e.g. for wiring an external shutdown trigger
    pub fn store(&self) -> Arc<FrontierStore> {
        self.store.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, to: Phase) -> Result<(), SweepError> {
        if !self.phase.can_transition_to(to) {
            return Err(SweepError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!("Lifecycle: {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Sets the crawl scope and seeds the frontier
    ///
    /// Returns the root domain derived from the seed.
    pub fn initialize(&mut self) -> Result<String, SweepError> {
        if self.phase != Phase::Initializing {
            return Err(SweepError::InvalidTransition {
                from: self.phase,
                to: Phase::Initializing,
            });
        }

        let root_domain = self.store.set_root_domain(&self.settings.seed)?;
        let seed = self.store.canonicalize(&self.settings.seed)?;

        if self.store.add_to_seen(&seed) {
            self.store
                .record_discovery(&seed, &self.settings.seed_description);
            self.store.push_unsearched(seed);
        }

        Ok(root_domain)
    }

    /// Runs the crawl to completion
    ///
    /// # Run Flow
    ///
    /// 1. Initialize scope and seed; start the service if configured
    /// 2. Spawn scraper and extractor workers
    /// 3. Sample every interval until the run duration elapses, or stop
    ///    early once shutdown is signalled externally
    /// 4. Signal shutdown and join every worker
    /// 5. Stop the service and build the report
    ///
    /// Initialization failures are fatal; per-item failures inside workers
    /// never are.
    pub async fn run(mut self) -> Result<CrawlReport, SweepError> {
        let started_at = Local::now();

        let root_domain = match self.initialize() {
            Ok(root) => root,
            Err(e) => {
                self.transition(Phase::Stopped)?;
                return Err(e);
            }
        };

        tracing::info!(
            "Starting crawl of {} at {}",
            root_domain,
            started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let service = match &self.service {
            Some(config) => match service::start(self.store.clone(), config).await {
                Ok(handle) => Some(handle),
                Err(e) => {
                    self.transition(Phase::Stopped)?;
                    return Err(e.into());
                }
            },
            None => None,
        };

        self.transition(Phase::Running)?;
        let mut workers = self.spawn_workers();
        let timeline = self.sample_until_done().await;

        self.transition(Phase::Draining)?;
        self.store.signal_shutdown();
        tracing::info!("Shutdown signalled, waiting for workers");

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(summary) => tracing::debug!(
                    "{} {} exited: {} handled, {} failed",
                    summary.role,
                    summary.id,
                    summary.handled,
                    summary.failed
                ),
                Err(e) => tracing::error!("Worker task failed: {}", e),
            }
        }

        self.transition(Phase::Stopped)?;
        if let Some(handle) = service {
            stop_service(handle).await;
        }

        let finished_at = Local::now();
        tracing::info!(
            "Crawl of {} ended at {}: {} pages finished, {} URLs seen",
            root_domain,
            finished_at.format("%Y-%m-%d %H:%M:%S"),
            self.store.finished_count(),
            self.store.seen_count()
        );

        Ok(CrawlReport {
            seed: self.settings.seed.clone(),
            root_domain,
            scrapers: self.settings.scrapers,
            extractors: self.settings.extractors,
            finished: self.store.finished_count(),
            seen_count: self.store.seen_count(),
            discoveries: self.store.discoveries(),
            timeline,
            started_at,
            finished_at,
            config_hash: self.config_hash.clone(),
        })
    }

    fn spawn_workers(&self) -> JoinSet<WorkerSummary> {
        let mut workers = JoinSet::new();

        for id in 0..self.settings.scrapers {
            workers.spawn(run_scraper(
                id,
                self.store.clone(),
                self.fetcher.clone(),
                self.settings.poll_timeout,
            ));
        }

        for id in 0..self.settings.extractors {
            workers.spawn(run_extractor(
                id,
                self.store.clone(),
                self.settings.poll_timeout,
            ));
        }

        tracing::info!(
            "Started {} scrapers and {} extractors",
            self.settings.scrapers,
            self.settings.extractors
        );
        workers
    }

    /// Samples every interval until the run duration is used up
    ///
    /// Elapsed time on the timeline is nominal (a multiple of the interval).
    async fn sample_until_done(&self) -> Timeline {
        let mut timeline = Timeline::new();
        timeline.anchor(&self.store);

        let interval = self.settings.sample_interval;
        let shutdown = self.store.shutdown_token();
        let mut elapsed = Duration::ZERO;

        while elapsed < self.settings.run_duration {
            let step = interval.min(self.settings.run_duration - elapsed);

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown requested before the run duration elapsed");
                    break;
                }
                _ = tokio::time::sleep(step) => {}
            }

            elapsed += step;
            timeline.record(&self.store, elapsed);
        }

        timeline
    }
}

async fn stop_service(handle: ServiceHandle) {
    if let Err(e) = handle.stop().await {
        tracing::warn!("Remote service did not stop cleanly: {}", e);
    }
}
