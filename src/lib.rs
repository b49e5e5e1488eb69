//! Sitesweep: a time-boxed single-domain crawler
//!
//! This crate crawls one registrable domain from a seed URL with a pool of
//! scraper workers (fetch) feeding a pool of extractor workers (text and link
//! extraction). All workers coordinate through a shared frontier store that
//! guarantees each URL is scheduled at most once.

pub mod config;
pub mod crawler;
pub mod frontier;
pub mod output;
pub mod page;
pub mod service;
pub mod url;

use thiserror::Error;

/// Main error type for Sitesweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Service error: {0}")]
    Service(#[from] service::ServiceError),

    #[error("Invalid lifecycle transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crawler::Phase,
        to: crawler::Phase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid host pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sitesweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Controller, CrawlReport};
pub use frontier::FrontierStore;
pub use page::{ExtractedPage, FetchedPage};
pub use url::{canonicalize, CanonicalUrl};
