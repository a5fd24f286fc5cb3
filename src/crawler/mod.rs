//! Crawler module for the two catalog crawl modes
//!
//! This module contains the crawl-and-persist pipeline, including:
//! - Per-item extraction with skip-instead-of-fail semantics
//! - The alphabetized-index crawl (one commit per page)
//! - The latest-feed crawl with detail-page visits (one commit per run)
//! - Injectable wait policies for settle and throttle delays

mod extractor;
mod index;
mod latest;
mod report;
#[cfg(test)]
mod testing;
mod wait;

pub use extractor::{
    extract_batch, extract_detail_page, extract_listing_item, Extraction, SkipReason,
};
pub use index::{IndexPage, IndexPager, IndexPaginationCrawler, PagerState};
pub use latest::SeedListDeepCrawler;
pub use report::{DeepCrawlReport, IndexCrawlReport};
pub use wait::{FixedDelay, NoDelay, WaitPolicy};

pub use crate::storage::CandidateRecord;

use crate::browser::HttpPageDriver;
use crate::config::Config;
use crate::storage::open_storage;
use crate::ScraperError;

/// Items of the alphabetized index
pub const INDEX_ITEM_SELECTOR: &str = "ul.lcp_catlist li";

/// Anchor inside an index item carrying title and link
pub const ITEM_ANCHOR_SELECTOR: &str = "a";

/// Visible text of the index's pagination control
pub const NEXT_PAGE_TEXT: &str = "Next Page";

/// Links of the latest-entries feed
pub const FEED_ITEM_SELECTOR: &str = ".wplp-box-item a";

/// Title heading of a detail page
pub const DETAIL_TITLE_SELECTOR: &str = "h1.entry-title";

/// Runs the alphabetized-index crawl described by `config`
///
/// This is the entry point used by the `fitgirl-az` binary. It will:
/// 1. Open the store and ensure its schema
/// 2. Build the HTTP page driver
/// 3. Walk the index, committing each page's new entries
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(IndexCrawlReport)` - The index was walked to its last page
/// * `Err(ScraperError)` - A fatal navigation or persistence error stopped the run
pub async fn run_az_crawl(config: &Config) -> Result<IndexCrawlReport, ScraperError> {
    tracing::info!("Checking database {}", config.database.path.display());
    let storage = open_storage(&config.database)?;

    tracing::info!("Starting index scraper");
    let mut driver = HttpPageDriver::new(config)?;
    let settle = FixedDelay::new(config.crawler.settle_delay());

    IndexPaginationCrawler::new(
        &mut driver,
        &storage,
        settle,
        config.crawler.az_start_url.as_str(),
    )
    .run()
    .await
}

/// Runs the latest-feed crawl described by `config`
///
/// This is the entry point used by the `fitgirl-latest` binary. It will:
/// 1. Open the store and ensure its schema
/// 2. Build the HTTP page driver
/// 3. Collect the feed's links, visit each, and commit the batch once
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(DeepCrawlReport)` - The feed was crawled and persisted
/// * `Err(ScraperError)` - A fatal navigation or persistence error stopped the run
pub async fn run_latest_crawl(config: &Config) -> Result<DeepCrawlReport, ScraperError> {
    tracing::info!("Checking database {}", config.database.path.display());
    let storage = open_storage(&config.database)?;

    tracing::info!("Starting feed scraper");
    let mut driver = HttpPageDriver::new(config)?;
    let visit_delay = FixedDelay::new(config.crawler.visit_delay());

    SeedListDeepCrawler::new(
        &mut driver,
        &storage,
        visit_delay,
        config.crawler.latest_start_url.as_str(),
        config.crawler.title_timeout(),
    )
    .run()
    .await
}
