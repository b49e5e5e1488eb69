//! Output module for writing crawl reports
//!
//! Each run writes one directory, `<results-dir>/<YYYYmmdd_HHMMSS>/`, stamped
//! with the time the run ended. It contains:
//! - `urls.csv`: every discovered URL with its description, sorted by URL
//! - `results.txt`: pool sizes, counts and the sorted URL list
//! - `stats.csv`: the progress timeline

pub mod stats;
mod summary;
mod tables;

pub use stats::print_statistics;
pub use summary::{format_results_text, write_results_text};
pub use tables::{write_stats_csv, write_urls_csv};

use crate::crawler::CrawlReport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Format of the per-run directory name
pub const RUN_DIR_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes every report for a finished run
///
/// # Arguments
///
/// * `report` - The finished run
/// * `results_dir` - Parent directory; created if missing
///
/// # Returns
///
/// The directory the reports were written to.
pub fn write_reports(report: &CrawlReport, results_dir: &Path) -> OutputResult<PathBuf> {
    let run_dir = results_dir.join(report.finished_at.format(RUN_DIR_FORMAT).to_string());
    std::fs::create_dir_all(&run_dir)?;

    write_urls_csv(&report.discoveries, &run_dir.join("urls.csv"))?;
    write_results_text(report, &run_dir.join("results.txt"))?;
    write_stats_csv(&report.timeline, &run_dir.join("stats.csv"))?;

    tracing::info!("Reports written to {}", run_dir.display());
    Ok(run_dir)
}
