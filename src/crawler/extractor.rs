//! Record extraction from listing items and detail pages
//!
//! Extraction never fails the caller: every attempt ends in [`Extraction::Record`] or
//! [`Extraction::Skip`], and probe errors are folded into a skip.

use crate::browser::{ElementHandle, PageDriver};
use crate::crawler::ITEM_ANCHOR_SELECTOR;
use crate::storage::CandidateRecord;
use crate::{BrowserError, BrowserResult};
use std::fmt;
use std::time::Duration;

/// Why an item produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The listing item has no anchor child
    MissingAnchor,

    /// The title text is empty after trimming
    EmptyTitle,

    /// The link attribute is missing or blank
    EmptyLink,

    /// Probing the DOM raised an error
    Probe(String),

    /// The detail page could not be loaded
    Navigation(String),

    /// The detail-page title did not appear within the bound
    Timeout(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAnchor => write!(f, "no anchor"),
            Self::EmptyTitle => write!(f, "empty title"),
            Self::EmptyLink => write!(f, "empty link"),
            Self::Probe(message) => write!(f, "probe failed: {}", message),
            Self::Navigation(message) => write!(f, "navigation failed: {}", message),
            Self::Timeout(message) => write!(f, "timed out: {}", message),
        }
    }
}

/// Outcome of one extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(CandidateRecord),
    Skip(SkipReason),
}

impl Extraction {
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub fn into_record(self) -> Option<CandidateRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Skip(_) => None,
        }
    }
}

/// Extracts `{title, link}` from one index item
///
/// The first anchor inside the item supplies both fields: its trimmed visible text and its
/// `href`. A missing anchor, blank title, blank link or probe error yields a skip.
pub fn extract_listing_item(item: &ElementHandle) -> Extraction {
    match probe_listing_item(item) {
        Ok(extraction) => extraction,
        Err(e) => Extraction::Skip(SkipReason::Probe(e.to_string())),
    }
}

fn probe_listing_item(item: &ElementHandle) -> BrowserResult<Extraction> {
    let anchor = match item.query_selector(ITEM_ANCHOR_SELECTOR)? {
        Some(anchor) => anchor,
        None => return Ok(Extraction::Skip(SkipReason::MissingAnchor)),
    };

    let title = anchor.inner_text();
    if title.is_empty() {
        return Ok(Extraction::Skip(SkipReason::EmptyTitle));
    }

    let link = match anchor.href() {
        Some(link) => link,
        None => return Ok(Extraction::Skip(SkipReason::EmptyLink)),
    };

    Ok(Extraction::Record(CandidateRecord::new(title, link)))
}

/// Runs the listing extractor over a page of items and keeps the records
///
/// # Returns
///
/// The records in DOM order and the number of skipped items
pub fn extract_batch(items: &[ElementHandle]) -> (Vec<CandidateRecord>, usize) {
    let mut batch = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for item in items {
        match extract_listing_item(item) {
            Extraction::Record(record) => batch.push(record),
            Extraction::Skip(reason) => {
                tracing::debug!("Skipping item: {}", reason);
                skipped += 1;
            }
        }
    }

    (batch, skipped)
}

/// Visits a detail page and recovers its canonical title
///
/// Navigates to `url`, then waits at most `timeout` for `title_selector`. On success the
/// record is `{trimmed title text, url}`. Navigation failures and timeouts are skips.
///
/// # Arguments
///
/// * `driver` - The page to drive
/// * `url` - Detail page to visit; becomes the record's link
/// * `title_selector` - Selector of the title heading
/// * `timeout` - Upper bound for the title wait
pub async fn extract_detail_page<D: PageDriver>(
    driver: &mut D,
    url: &str,
    title_selector: &str,
    timeout: Duration,
) -> Extraction {
    if let Err(e) = driver.goto(url).await {
        return Extraction::Skip(SkipReason::Navigation(e.to_string()));
    }

    // Bound the wait here as well, whatever the backend does with `timeout`
    let waited =
        tokio::time::timeout(timeout, driver.wait_for_selector(title_selector, timeout)).await;

    let element = match waited {
        Ok(Ok(element)) => element,
        Ok(Err(e @ BrowserError::Timeout { .. })) => {
            return Extraction::Skip(SkipReason::Timeout(e.to_string()))
        }
        Ok(Err(e)) => return Extraction::Skip(SkipReason::Probe(e.to_string())),
        Err(_) => {
            return Extraction::Skip(SkipReason::Timeout(format!(
                "'{}' not found within {}ms",
                title_selector,
                timeout.as_millis()
            )))
        }
    };

    let title = element.inner_text();
    if title.is_empty() {
        return Extraction::Skip(SkipReason::EmptyTitle);
    }

    Extraction::Record(CandidateRecord::new(title, url))
}
