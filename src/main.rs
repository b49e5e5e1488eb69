//! Sitesweep main entry point
//!
//! This is the command-line interface for the Sitesweep domain crawler.

use anyhow::Context;
use clap::Parser;
use sitesweep::config::{load_config_with_hash, validate, Config};
use sitesweep::crawler::{user_agent_string, Controller, CrawlSettings, HttpFetcher};
use sitesweep::output::{print_statistics, write_reports};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sitesweep: a time-boxed single-domain crawler
///
/// Sitesweep crawls every page reachable from a seed URL within the seed's
/// registrable domain for a fixed amount of time, then writes the URLs it
/// found and a progress timeline.
#[derive(Parser, Debug)]
#[command(name = "sitesweep")]
#[command(version = "1.0.0")]
#[command(about = "A time-boxed single-domain crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the run duration (seconds)
    #[arg(long, value_name = "SECS")]
    duration: Option<u64>,

    /// Override the number of scraper workers
    #[arg(long, value_name = "N")]
    scrapers: Option<usize>,

    /// Override the number of extractor workers
    #[arg(long, value_name = "N")]
    extractors: Option<usize>,
}

impl Cli {
    /// Applies command-line overrides; the result must be re-validated
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(duration) = self.duration {
            config.crawler.run_duration_secs = duration;
        }
        if let Some(scrapers) = self.scrapers {
            config.crawler.scrapers = scrapers;
        }
        if let Some(extractors) = self.extractors {
            config.crawler.extractors = extractors;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesweep=info,warn"),
            1 => EnvFilter::new("sitesweep=debug,info"),
            2 => EnvFilter::new("sitesweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sitesweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Seed description: {}", config.crawler.seed_description);
    println!("  Run duration: {}s", config.crawler.run_duration_secs);
    println!("  Scrapers: {}", config.crawler.scrapers);
    println!("  Extractors: {}", config.crawler.extractors);
    println!("  Sample interval: {}s", config.crawler.sample_interval_secs);
    println!("  Poll timeout: {}ms", config.crawler.poll_timeout_ms);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Scheme distinct: {}", config.crawler.scheme_distinct);

    println!("\nUser Agent: {}", user_agent_string(&config.user_agent));

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);

    match &config.service {
        Some(service) => {
            println!("\nService:");
            println!("  Bind address: {}", service.bind_address);
            println!("  Name: {}", service.service_name);
            println!(
                "  Registry: {}",
                service.registry_url.as_deref().unwrap_or("(none)")
            );
        }
        None => println!("\nService: disabled"),
    }

    println!("\nBlacklisted Hosts ({}):", config.blacklist.len());
    for entry in &config.blacklist {
        println!("  - {}", entry.host);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: String) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(
        &config.user_agent,
        Duration::from_secs(config.crawler.fetch_timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    let mut controller =
        Controller::new(CrawlSettings::from(&config), Arc::new(fetcher)).with_config_hash(config_hash);
    if let Some(service) = &config.service {
        controller = controller.with_service(service.clone());
    }

    // Ctrl-C drains the run the same way the timer does
    let store = controller.store();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping crawl");
            store.signal_shutdown();
        }
    });

    let report = match controller.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let run_dir = write_reports(&report, Path::new(&config.output.results_dir))
        .context("Failed to write reports")?;

    print_statistics(&report);
    println!("\nReports written to: {}", run_dir.display());

    Ok(())
}
