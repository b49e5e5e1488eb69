//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests that follow redirects and report the final URL
//! - Error classification (timeout, connection, status, content type)
//!
//! Failures are never retried; the scraper drops the URL.

use crate::config::UserAgentConfig;
use crate::page::FetchedPage;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Maximum redirect hops followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// Reasons a single fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("HTTP error for {url}: {message}")]
    Network { url: String, message: String },
}

impl FetchError {
    /// Classifies a reqwest error for the given URL
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url }
        } else if err.is_connect() {
            FetchError::Connect {
                url,
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            FetchError::Network {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Transport used by scraper workers
///
/// Implementations return the page keyed by its final (post-redirect) URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Formats the User-Agent header value
///
/// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when either
/// contact field is configured.
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    let contact: Vec<&str> = [config.contact_url.as_deref(), config.contact_email.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    match contact.as_slice() {
        [] => format!("{}/{}", config.crawler_name, config.crawler_version),
        [url, email] => format!(
            "{}/{} (+{}; {})",
            config.crawler_name, config.crawler_version, url, email
        ),
        [one] => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, one
        ),
        _ => format!("{}/{}", config.crawler_name, config.crawler_version),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed for one request, body included
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sitesweep::config::UserAgentConfig;
/// use sitesweep::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "WebScraperTest".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: None,
///     contact_email: None,
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from user agent settings and a per-request timeout
    pub fn from_config(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config, timeout)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a page
    ///
    /// # Request Flow
    ///
    /// 1. Send GET, following up to 10 redirects
    /// 2. Non-2xx status → `FetchError::Status`
    /// 3. A Content-Type header that is present but not HTML → `FetchError::ContentMismatch`
    /// 4. Read the body as text
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.to_ascii_lowercase().contains("html") {
                return Err(FetchError::ContentMismatch {
                    url: final_url,
                    content_type: content_type.to_string(),
                });
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchedPage::new(final_url, body))
    }
}
