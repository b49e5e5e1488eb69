//! CSV reports

use crate::crawler::Timeline;
use crate::output::OutputResult;
use std::path::Path;

/// Writes `URL,Description` rows in the given order
pub fn write_urls_csv(discoveries: &[(String, String)], path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["URL", "Description"])?;

    for (url, description) in discoveries {
        writer.write_record([url.as_str(), description.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one row per timeline sample
pub fn write_stats_csv(timeline: &Timeline, path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["time", "seen_url_count", "unsearched_count", "unextracted_count"])?;

    for sample in timeline.samples() {
        writer.write_record(&[
            sample.elapsed_secs.to_string(),
            sample.seen.to_string(),
            sample.frontier_depth.to_string(),
            sample.extract_queue_depth.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
