//! Lifecycle phases of a crawl run
//!
//! A run moves strictly forward: Initializing → Running → Draining → Stopped.
//! A run that fails during initialization goes straight to Stopped.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Root domain, blacklist and seed are being set up
    Initializing,

    /// Workers are running and the sampler is ticking
    Running,

    /// Shutdown has been signalled; waiting for workers to exit
    Draining,

    /// All workers joined; the report can be written
    Stopped,
}

impl Phase {
    /// Returns true if a run in this phase may move to `next`
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Self::Initializing, Self::Running)
                | (Self::Initializing, Self::Stopped)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Stopped)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
