//! The page driver capability the crawlers run against

use crate::browser::ElementHandle;
use crate::BrowserResult;
use async_trait::async_trait;
use std::time::Duration;

/// A single browser page that can navigate, query, wait and click
///
/// Every method is a suspension point: the caller halts until the page reports load
/// completion or the wait resolves. Only [`PageDriver::wait_for_selector`] carries an
/// explicit bound; everything else relies on the backend's own defaults.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates the page to `url` and waits for it to load
    async fn goto(&mut self, url: &str) -> BrowserResult<()>;

    /// URL of the currently loaded page, after redirects
    fn current_url(&self) -> Option<&str>;

    /// Snapshots every element matching `selector`, in document order
    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>>;

    /// Waits up to `timeout` for an element matching `selector` to appear
    ///
    /// # Returns
    ///
    /// * `Ok(ElementHandle)` - The first matching element
    /// * `Err(BrowserError::Timeout)` - Nothing matched within the bound
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> BrowserResult<ElementHandle>;

    /// Finds a link whose visible text equals `text` and that can be clicked
    async fn find_link_by_text(&self, text: &str) -> BrowserResult<Option<ElementHandle>>;

    /// Activates a link and waits for the resulting page to load
    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()>;
}
