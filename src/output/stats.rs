//! Console statistics for a finished run
//!
//! This module prints the end-of-run summary to stdout.

use crate::crawler::CrawlReport;

/// Pages finished per second of wall-clock run time
pub fn pages_per_second(report: &CrawlReport) -> f64 {
    let millis = report.duration().num_milliseconds();
    if millis <= 0 {
        return 0.0;
    }
    report.finished as f64 / (millis as f64 / 1000.0)
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The finished run to display
pub fn print_statistics(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Seed: {}", report.seed);
    println!("  Root domain: {}", report.root_domain);
    println!(
        "  Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Ended: {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(hash) = &report.config_hash {
        println!("  Config hash: {}", hash);
    }
    println!();

    println!("Workers:");
    println!("  Scrapers: {}", report.scrapers);
    println!("  Extractors: {}", report.extractors);
    println!();

    println!("Overview:");
    println!("  Number of pages scraped: {}", report.finished);
    println!("  Number of URLs found: {}", report.unique_urls());
    println!("  URLs seen: {}", report.seen_count);
    println!("  Throughput: {:.2} pages/sec", pages_per_second(report));

    if let Some(last) = report.timeline.last() {
        println!(
            "  Left unvisited: {} queued for fetch, {} queued for extraction",
            last.frontier_depth, last.extract_queue_depth
        );
    }
}
