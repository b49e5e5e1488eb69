//! Crawler module for fetching and processing pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - HTML text and link extraction
//! - Scraper and extractor worker loops
//! - Progress sampling and the run lifecycle

mod controller;
mod extractor;
mod fetcher;
mod parser;
mod phase;
mod sampler;
mod scraper;

pub use controller::{Controller, CrawlReport, CrawlSettings};
pub use extractor::{extract_page, run_extractor, ExtractError, PageOutcome};
pub use fetcher::{build_http_client, user_agent_string, FetchError, HttpFetcher, PageFetcher};
pub use parser::{extract_links, extract_text, RawLink};
pub use phase::Phase;
pub use sampler::{Sample, Timeline};
pub use scraper::{run_scraper, scrape_one};

use std::fmt;

/// Which pool a worker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    Scraper,
    Extractor,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scraper => write!(f, "Scraper"),
            Self::Extractor => write!(f, "Extractor"),
        }
    }
}

/// Per-worker tally returned when a worker exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSummary {
    pub role: WorkerRole,
    pub id: usize,
    pub handled: u64,
    pub failed: u64,
}

impl WorkerSummary {
    pub fn scraper(id: usize) -> Self {
        Self::new(WorkerRole::Scraper, id)
    }

    pub fn extractor(id: usize) -> Self {
        Self::new(WorkerRole::Extractor, id)
    }

    fn new(role: WorkerRole, id: usize) -> Self {
        Self {
            role,
            id,
            handled: 0,
            failed: 0,
        }
    }
}
