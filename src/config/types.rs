use serde::Deserialize;

/// Main configuration structure for Sitesweep
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub service: Option<ServiceConfig>,
    #[serde(default)]
    pub blacklist: Vec<BlacklistEntry>,
}

impl Config {
    /// Blacklisted hosts as plain strings
    pub fn blacklist_hosts(&self) -> Vec<String> {
        self.blacklist.iter().map(|b| b.host.clone()).collect()
    }
}

/// Crawl run parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// URL the crawl starts from; its registrable domain becomes the scope
    pub seed: String,

    /// Description recorded for the seed in the URL report
    #[serde(default = "default_seed_description")]
    pub seed_description: String,

    /// Wall-clock length of the run (seconds)
    pub run_duration_secs: u64,

    /// Number of scraper (fetch) workers
    #[serde(default = "default_scrapers")]
    pub scrapers: usize,

    /// Number of extractor workers
    #[serde(default = "default_extractors")]
    pub extractors: usize,

    /// Time between progress samples (seconds)
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,

    /// Longest a worker waits on an empty queue before re-checking shutdown (milliseconds)
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Total time allowed for one page fetch (seconds)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Treat http and https variants of a URL as different pages
    #[serde(default)]
    pub scheme_distinct: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(default)]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory that receives one timestamped subdirectory per run
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

/// Remote-access service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServiceConfig {
    /// Socket address to listen on (port 0 picks a free port)
    pub bind_address: String,

    /// Name announced to the registry
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Base URL of the service registry, if registration is wanted
    #[serde(default)]
    pub registry_url: Option<String>,
}

/// Host excluded from the crawl even when in scope
#[derive(Debug, Clone, Deserialize)]
pub struct BlacklistEntry {
    /// Exact host name, matched case-insensitively
    pub host: String,
}

fn default_seed_description() -> String {
    "Home Page".to_string()
}

fn default_scrapers() -> usize {
    9
}

fn default_extractors() -> usize {
    1
}

fn default_sample_interval_secs() -> u64 {
    15
}

fn default_poll_timeout_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_service_name() -> String {
    "WebScraperDB".to_string()
}
