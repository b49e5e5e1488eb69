//! Plain-text run summary

use crate::crawler::CrawlReport;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes `results.txt` for a finished run
pub fn write_results_text(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let mut file = File::create(output_path)?;
    file.write_all(format_results_text(report).as_bytes())?;
    Ok(())
}

/// Formats the run summary followed by every unique URL, one per line
pub fn format_results_text(report: &CrawlReport) -> String {
    let mut text = String::new();

    text.push_str("Scraper Stats\n--------------------\n");
    text.push_str(&format!("nScrapers: {}\n", report.scrapers));
    text.push_str(&format!("nExtractors: {}\n", report.extractors));
    text.push_str(&format!("Number of pages scraped: {}\n", report.finished));
    text.push_str(&format!("Number of URLs found: {}\n", report.unique_urls()));
    text.push_str("List of All Unique URLs Accessed:\n");

    for (url, _) in &report.discoveries {
        text.push_str(url);
        text.push('\n');
    }

    text
}
