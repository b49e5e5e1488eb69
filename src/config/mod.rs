//! Configuration module for Sitesweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitesweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will run for {}s", config.crawler.run_duration_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BlacklistEntry, Config, CrawlerConfig, OutputConfig, ServiceConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
