use crate::config::types::{BlacklistEntry, Config, CrawlerConfig, OutputConfig, ServiceConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::net::SocketAddr;
use url::Url;

/// Largest worker pool accepted for either role
const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    if let Some(service) = &config.service {
        validate_service_config(service)?;
    }
    validate_blacklist(&config.blacklist)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    validate_seed(&config.seed)?;

    if config.run_duration_secs < 1 {
        return Err(ConfigError::Validation(
            "run_duration_secs must be >= 1".to_string(),
        ));
    }

    for (name, size) in [("scrapers", config.scrapers), ("extractors", config.extractors)] {
        if size < 1 || size > MAX_WORKERS {
            return Err(ConfigError::Validation(format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_WORKERS, size
            )));
        }
    }

    if config.sample_interval_secs < 1 {
        return Err(ConfigError::Validation(
            "sample_interval_secs must be >= 1".to_string(),
        ));
    }

    if config.poll_timeout_ms < 10 || config.poll_timeout_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "poll_timeout_ms must be between 10 and 60000, got {}",
            config.poll_timeout_ms
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "fetch_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// The seed must be an absolute http(s) URL with a host
fn validate_seed(seed: &str) -> ConfigResult<()> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' has no host",
            seed
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.results_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_service_config(config: &ServiceConfig) -> ConfigResult<()> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid bind_address '{}': {}",
            config.bind_address, e
        ))
    })?;

    if config.service_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "service_name cannot be empty".to_string(),
        ));
    }

    if let Some(registry) = &config.registry_url {
        let url = Url::parse(registry).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid registry_url '{}': {}", registry, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "registry_url '{}' must use http or https",
                registry
            )));
        }
    }

    Ok(())
}

fn validate_blacklist(entries: &[BlacklistEntry]) -> ConfigResult<()> {
    for entry in entries {
        validate_host(&entry.host)?;
    }
    Ok(())
}

/// Validates an exact host name (no wildcards)
fn validate_host(host: &str) -> ConfigResult<()> {
    if host.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Blacklist host cannot be empty".to_string(),
        ));
    }

    if host.contains('*') {
        return Err(ConfigError::InvalidPattern(format!(
            "Blacklist host '{}' must be an exact host, wildcards are not supported",
            host
        )));
    }

    if !host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' contains invalid characters",
            host
        )));
    }

    if host.starts_with('.')
        || host.ends_with('.')
        || host.starts_with('-')
        || host.ends_with('-')
        || host.contains("..")
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Host '{}' is not a well-formed name",
            host
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> ConfigResult<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
