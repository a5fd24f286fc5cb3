//! Alphabetized-index scraper
//!
//! Walks every page of the A-Z repack index and stores entries not seen before.

use anyhow::Context;
use clap::Parser;
use repack_scraper::config::load_config;
use repack_scraper::crawler::run_az_crawl;
use repack_scraper::logging::setup_logging;
use repack_scraper::storage::{SqliteStorage, Storage};

/// Crawl the A-Z repack index into the database named by DATABASE_URL
#[derive(Parser, Debug)]
#[command(name = "fitgirl-az")]
#[command(version)]
#[command(about = "Crawl the A-Z repack index", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config().context("failed to load configuration")?;

    let report = match run_az_crawl(&config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Index crawl failed: {}", e);
            return Err(e).context("index crawl aborted");
        }
    };

    let storage = SqliteStorage::from_config(&config.database)?;
    tracing::info!(
        "Scraping complete: {} new entries, {} stored in total",
        report.inserted,
        storage.count_entries()?
    );

    Ok(())
}
