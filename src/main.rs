//! Vitrina main entry point
//!
//! This is the command-line interface for the Vitrina catalog scraper.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrina::config::load_config_with_hash;
use vitrina::crawler::{crawl, flatten_dump};

/// Vitrina: a single-site catalog scraper
///
/// Vitrina walks one e-commerce site's catalog sections, extracts product
/// records from their detail pages, checkpoints them into a JSON dump, and
/// flattens the dump into a semicolon-delimited CSV report.
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(version = "1.0.0")]
#[command(about = "A single-site catalog scraper with a CSV report", long_about = None)]
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

    /// Skip the crawl and re-flatten the existing dump file
    #[arg(long, conflicts_with = "dry_run")]
    flatten_only: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "flatten_only")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.flatten_only {
        handle_flatten_only(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("vitrina=info,warn"),
            1 => EnvFilter::new("vitrina=debug,info"),
            2 => EnvFilter::new("vitrina=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &vitrina::config::Config) {
    println!("=== Vitrina Dry Run ===\n");

    println!("Site:");
    println!("  Origin: {}", config.site.origin);
    println!("  Catalog root: {}", config.site.catalog_url());
    println!("  Page parameter: {}", config.site.page_param);

    println!("\nCrawler:");
    println!("  Batch size: {}", config.crawler.batch_size);

    println!("\nOutput:");
    println!("  Dump: {}", config.output.dump_path);
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl the catalog tree under {}", config.site.catalog_url());
}

/// Handles the --flatten-only mode: re-reads the dump and rewrites the CSV
fn handle_flatten_only(
    config: &vitrina::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Flatten-only run: reading dump {} (no crawl)",
        config.output.dump_path
    );

    match flatten_dump(config) {
        Ok(()) => {
            tracing::info!("CSV report regenerated at {}", config.output.csv_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Flattening failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: vitrina::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of {} (batch size {})",
        config.site.origin,
        config.crawler.batch_size
    );

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
