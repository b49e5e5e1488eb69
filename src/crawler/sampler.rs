//! Periodic samples of crawl progress

use crate::frontier::FrontierStore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One point on the progress timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Nominal time since the run started, in seconds
    pub elapsed_secs: f64,
    pub seen: usize,
    pub frontier_depth: usize,
    pub extract_queue_depth: usize,
}

/// Ordered list of samples taken during a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    samples: Vec<Sample>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the t=0 sample
    ///
    /// The seen count is reported as zero at the start so the timeline
    /// measures growth from the seed. Queue depths are reported as they are.
    pub fn anchor(&mut self, store: &FrontierStore) {
        self.samples.push(Sample {
            elapsed_secs: 0.0,
            seen: 0,
            frontier_depth: store.frontier_depth(),
            extract_queue_depth: store.extract_queue_depth(),
        });
    }

    pub fn record(&mut self, store: &FrontierStore, elapsed: Duration) {
        self.samples.push(Sample {
            elapsed_secs: elapsed.as_secs_f64(),
            seen: store.seen_count(),
            frontier_depth: store.frontier_depth(),
            extract_queue_depth: store.extract_queue_depth(),
        });
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
