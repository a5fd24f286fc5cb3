//! Alphabetized-index crawl
//!
//! The index is a chain of listing pages linked by a "Next Page" control. [`IndexPager`]
//! walks that chain lazily, one page per call; [`IndexPaginationCrawler`] extracts and
//! persists each page before asking for the next one, so every page is committed on its own.
//!
//! There is no page bound other than the control disappearing. A chain whose "Next Page"
//! never disappears is walked forever.

use crate::browser::{ElementHandle, PageDriver};
use crate::crawler::extractor::extract_batch;
use crate::crawler::report::IndexCrawlReport;
use crate::crawler::wait::WaitPolicy;
use crate::crawler::{INDEX_ITEM_SELECTOR, NEXT_PAGE_TEXT};
use crate::storage::Storage;
use crate::ScraperError;

/// Where the pager is in the index chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// The start page has not been loaded yet
    Load,
    /// A page was yielded; the next call looks for "Next Page"
    Advance,
    /// No "Next Page" control remained, or a fatal error occurred
    Done,
}

/// One listing page of the index
#[derive(Debug, Clone)]
pub struct IndexPage {
    /// 1-based position in the chain
    pub number: usize,
    /// URL after navigation, if the driver reports one
    pub url: Option<String>,
    /// Item handles in DOM order
    pub items: Vec<ElementHandle>,
}

/// Lazily yields index pages until the "Next Page" control is gone
pub struct IndexPager<'a, D, W> {
    driver: &'a mut D,
    settle: &'a W,
    start_url: String,
    state: PagerState,
    pages_loaded: usize,
}

impl<'a, D: PageDriver, W: WaitPolicy> IndexPager<'a, D, W> {
    /// Creates a pager positioned before the start page
    ///
    /// # Arguments
    ///
    /// * `driver` - The page to drive
    /// * `settle` - Pause applied after each "Next Page" click
    /// * `start_url` - First page of the index
    pub fn new(driver: &'a mut D, settle: &'a W, start_url: impl Into<String>) -> Self {
        Self {
            driver,
            settle,
            start_url: start_url.into(),
            state: PagerState::Load,
            pages_loaded: 0,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Moves to the next page and returns its items
    ///
    /// # Returns
    ///
    /// * `Ok(Some(IndexPage))` - A freshly loaded page
    /// * `Ok(None)` - The chain has ended
    /// * `Err(ScraperError)` - Loading the start page or following "Next Page" failed
    pub async fn next_page(&mut self) -> Result<Option<IndexPage>, ScraperError> {
        match self.step().await {
            Ok(page) => Ok(page),
            Err(e) => {
                self.state = PagerState::Done;
                Err(e)
            }
        }
    }

    async fn step(&mut self) -> Result<Option<IndexPage>, ScraperError> {
        match self.state {
            PagerState::Load => {
                tracing::info!("Navigating to {}", self.start_url);
                self.driver.goto(&self.start_url).await?;
            }
            PagerState::Advance => match self.driver.find_link_by_text(NEXT_PAGE_TEXT).await? {
                Some(next) => {
                    tracing::debug!("Following '{}' to {:?}", NEXT_PAGE_TEXT, next.href());
                    self.driver.click(&next).await?;
                    self.settle.wait().await;
                }
                None => {
                    tracing::info!("No more '{}' control found, reached end of list", NEXT_PAGE_TEXT);
                    self.state = PagerState::Done;
                    return Ok(None);
                }
            },
            PagerState::Done => return Ok(None),
        }

        self.state = PagerState::Advance;
        self.pages_loaded += 1;

        let items = self.driver.query_selector_all(INDEX_ITEM_SELECTOR).await?;

        Ok(Some(IndexPage {
            number: self.pages_loaded,
            url: self.driver.current_url().map(str::to_string),
            items,
        }))
    }
}

/// Extract, persist, advance; repeated until the index ends
pub struct IndexPaginationCrawler<'a, D, S: ?Sized, W> {
    driver: &'a mut D,
    storage: &'a S,
    settle: W,
    start_url: String,
}

impl<'a, D, S, W> IndexPaginationCrawler<'a, D, S, W>
where
    D: PageDriver,
    S: Storage + ?Sized,
    W: WaitPolicy,
{
    /// Creates a crawler for the index starting at `start_url`
    ///
    /// # Arguments
    ///
    /// * `driver` - The page to drive
    /// * `storage` - Store receiving one batch per page
    /// * `settle` - Pause applied after each "Next Page" click
    /// * `start_url` - First page of the index
    pub fn new(
        driver: &'a mut D,
        storage: &'a S,
        settle: W,
        start_url: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            storage,
            settle,
            start_url: start_url.into(),
        }
    }

    /// Runs the crawl to the end of the index
    ///
    /// Each page's batch is committed before the crawler advances, so pages persisted before
    /// a fatal error stay durable.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexCrawlReport)` - The index ended normally
    /// * `Err(ScraperError)` - A navigation or persistence failure aborted the run
    pub async fn run(self) -> Result<IndexCrawlReport, ScraperError> {
        let mut report = IndexCrawlReport::default();
        let mut pager = IndexPager::new(self.driver, &self.settle, self.start_url);

        while let Some(page) = pager.next_page().await? {
            tracing::info!("Page {} loaded. Extracting data...", page.number);
            tracing::info!("Found {} total games", page.items.len());

            let (batch, skipped) = extract_batch(&page.items);
            tracing::info!("Successfully scraped {} games", batch.len());

            let inserted = self.storage.save_batch(&batch)?;
            report.record_page(page.items.len(), batch.len(), skipped, inserted);
        }

        tracing::info!("Index crawl complete: {}", report);
        Ok(report)
    }
}
