//! "Latest repacks" feed crawl
//!
//! The home feed only carries reliable links, so titles are recovered from each entry's
//! detail page. The crawl collects the feed's links, visits them one by one and persists the
//! accumulated batch once at the very end: a fatal error mid-visit loses the whole run.

use crate::browser::PageDriver;
use crate::crawler::extractor::{extract_detail_page, Extraction};
use crate::crawler::report::DeepCrawlReport;
use crate::crawler::wait::WaitPolicy;
use crate::crawler::{DETAIL_TITLE_SELECTOR, FEED_ITEM_SELECTOR};
use crate::storage::{CandidateRecord, Storage};
use crate::ScraperError;
use std::time::Duration;

/// Collect seeds, visit each, persist once
pub struct SeedListDeepCrawler<'a, D, S: ?Sized, W> {
    driver: &'a mut D,
    storage: &'a S,
    visit_delay: W,
    feed_url: String,
    title_timeout: Duration,
}

impl<'a, D, S, W> SeedListDeepCrawler<'a, D, S, W>
where
    D: PageDriver,
    S: Storage + ?Sized,
    W: WaitPolicy,
{
    /// Creates a crawler for the feed at `feed_url`
    ///
    /// # Arguments
    ///
    /// * `driver` - The page to drive
    /// * `storage` - Store receiving the final batch
    /// * `visit_delay` - Pause applied after every detail visit
    /// * `feed_url` - Page listing the latest entries
    /// * `title_timeout` - Bound for each detail-page title wait
    pub fn new(
        driver: &'a mut D,
        storage: &'a S,
        visit_delay: W,
        feed_url: impl Into<String>,
        title_timeout: Duration,
    ) -> Self {
        Self {
            driver,
            storage,
            visit_delay,
            feed_url: feed_url.into(),
            title_timeout,
        }
    }

    /// Loads the feed and returns its detail-page links in feed order
    ///
    /// Items without a usable `href` are dropped. Failing to load the feed is fatal.
    pub async fn collect_seeds(&mut self) -> Result<Vec<String>, ScraperError> {
        tracing::info!("Navigating to {}", self.feed_url);
        self.driver.goto(&self.feed_url).await?;

        tracing::info!("Page loaded. Extracting data...");
        let seeds: Vec<String> = self
            .driver
            .query_selector_all(FEED_ITEM_SELECTOR)
            .await?
            .iter()
            .filter_map(|item| item.href())
            .collect();

        tracing::info!("Found {} total games", seeds.len());
        Ok(seeds)
    }

    /// Visits every seed in order and accumulates the recovered records
    ///
    /// A seed whose page fails to load or whose title does not appear in time is skipped.
    /// The visit delay is applied after every visit, whatever its outcome.
    ///
    /// # Returns
    ///
    /// The records in seed order and the number of skipped seeds
    pub async fn visit_seeds(&mut self, seeds: &[String]) -> (Vec<CandidateRecord>, usize) {
        let mut batch = Vec::with_capacity(seeds.len());
        let mut skipped = 0;

        for (i, url) in seeds.iter().enumerate() {
            tracing::info!("[{}/{}] Visiting: {}", i + 1, seeds.len(), url);

            match extract_detail_page(
                &mut *self.driver,
                url,
                DETAIL_TITLE_SELECTOR,
                self.title_timeout,
            )
            .await
            {
                Extraction::Record(record) => batch.push(record),
                Extraction::Skip(reason) => {
                    tracing::warn!("Skipping {}: {}", url, reason);
                    skipped += 1;
                }
            }

            self.visit_delay.wait().await;
        }

        (batch, skipped)
    }

    /// Runs the full crawl: collect, visit, persist
    ///
    /// # Returns
    ///
    /// * `Ok(DeepCrawlReport)` - The batch was persisted
    /// * `Err(ScraperError)` - The feed failed to load or the final commit failed
    pub async fn run(mut self) -> Result<DeepCrawlReport, ScraperError> {
        let seeds = self.collect_seeds().await?;
        let (batch, skipped) = self.visit_seeds(&seeds).await;

        tracing::info!("Successfully scraped {} games", batch.len());
        let inserted = self.storage.save_batch(&batch)?;

        let report = DeepCrawlReport {
            seeds: seeds.len(),
            records_extracted: batch.len(),
            seeds_skipped: skipped,
            inserted,
        };
        tracing::info!("Feed crawl complete: {}", report);
        Ok(report)
    }
}
