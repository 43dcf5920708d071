//! Bedesten main entry point
//!
//! This is the command-line interface for the Bedesten review and listing
//! harvester.

use anyhow::Context;
use bedesten::config::{load_config, resolve_api_key, Config};
use bedesten::fetch::{Fetcher, RenderApi, RetryPolicy};
use bedesten::review::LabelTable;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Bedesten: a review and listing harvester
///
/// Bedesten walks restaurant review pages through a remote rendering API,
/// retrying transient failures page by page, and can also pull one-shot
/// product listings from a set of retail catalogs. Each entity ends up as
/// one JSON artifact.
#[derive(Parser, Debug)]
#[command(name = "bedesten")]
#[command(version = "1.0.0")]
#[command(about = "A review and listing harvester", long_about = None)]
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

    /// Scrape the retail catalogs instead of the review batches
    #[arg(long, conflicts_with = "dry_run")]
    listings: bool,

    /// Validate config and show what would run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // The credential only matters once we actually fetch
    let api_key = resolve_api_key(&config)?;
    let adapter = RenderApi::new(
        &config.fetch.api_endpoint,
        api_key,
        Duration::from_secs(config.fetch.request_timeout_secs),
    )?;

    if cli.listings {
        handle_listings(&config, &adapter).await
    } else {
        handle_reviews(&config, adapter).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bedesten=info,warn"),
            1 => EnvFilter::new("bedesten=debug,info"),
            2 => EnvFilter::new("bedesten=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the effective plan
fn handle_dry_run(config: &Config) {
    println!("=== Bedesten Dry Run ===\n");

    println!("Fetch:");
    println!("  Endpoint: {}", config.fetch.api_endpoint);
    println!("  Credential env var: {}", config.fetch.api_key_env);
    println!("  Max attempts: {}", config.fetch.max_attempts);
    println!("  Retry delay: {}ms", config.fetch.retry_delay_ms);
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);

    println!("\nInput:");
    println!("  Directory: {}", config.input.directory);
    let prefix = if config.input.prefix.is_empty() {
        "(input directory name)"
    } else {
        &config.input.prefix
    };
    println!("  Batch prefix: {}", prefix);

    println!("\nOutput:");
    println!("  Reviews directory: {}", config.output.reviews_dir);
    println!("  Listings artifact: {}", config.output.listings_path);

    println!("\nSkipped entities ({}):", config.skip.names.len());
    for name in &config.skip.names {
        println!("  - {}", name);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the default mode: the paginated review batch run
async fn handle_reviews(config: &Config, adapter: RenderApi) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(
        adapter,
        RetryPolicy {
            max_attempts: config.fetch.max_attempts,
            delay: Duration::from_millis(config.fetch.retry_delay_ms),
        },
    );
    let labels = LabelTable::default();

    match bedesten::review::run_reviews(config, &fetcher, &labels).await {
        Ok(()) => {
            tracing::info!("Review run completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Review run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the --listings mode: one-shot retail catalog extraction
async fn handle_listings(config: &Config, adapter: &RenderApi) -> anyhow::Result<()> {
    match bedesten::listings::run_listings(config, adapter).await {
        Ok(()) => {
            tracing::info!("Listings run completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Listings run failed: {}", e);
            Err(e.into())
        }
    }
}
