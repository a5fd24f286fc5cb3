//! HTTP-backed page driver
//!
//! The catalog is rendered server-side, so a page can be "driven" by fetching its HTML,
//! querying it with CSS selectors and following a clicked link's `href`. The loaded document
//! never mutates after the fetch, so a selector that is absent right after load will never
//! appear: [`HttpPageDriver::wait_for_selector`] reports that as a timeout straight away.

use crate::browser::element::select_all;
use crate::browser::{ElementHandle, PageDriver};
use crate::config::Config;
use crate::{BrowserError, BrowserResult};
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// A page loaded by the driver
#[derive(Debug, Clone)]
struct LoadedPage {
    url: Url,
    html: String,
}

/// Page driver that fetches documents over HTTP
pub struct HttpPageDriver {
    client: Client,
    current: Option<LoadedPage>,
}

/// Builds an HTTP client with the configured identity and timeouts
///
/// # Arguments
///
/// * `user_agent` - Full `User-Agent` header value
/// * `request_timeout` - Upper bound for a single page load, if any
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &str,
    request_timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

impl HttpPageDriver {
    /// Creates a driver configured from the crawler settings
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.value,
            config.crawler.request_timeout(),
        )?;
        Ok(Self::with_client(client))
    }

    /// Creates a driver around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    fn loaded(&self) -> BrowserResult<&LoadedPage> {
        self.current.as_ref().ok_or(BrowserError::NoPage)
    }

    /// Snapshots matches from the current document
    ///
    /// The parsed document is not `Send`, so it is built and dropped here without crossing
    /// an await point.
    fn select_current(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>> {
        let page = self.loaded()?;
        let document = Html::parse_document(&page.html);
        select_all(&document, selector, Some(&page.url))
    }
}

#[async_trait]
impl PageDriver for HttpPageDriver {
    async fn goto(&mut self, url: &str) -> BrowserResult<()> {
        let target = Url::parse(url).map_err(|e| BrowserError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                message: if e.is_timeout() {
                    "request timeout".to_string()
                } else {
                    e.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        tracing::trace!("Loaded {} ({} bytes)", final_url, html.len());
        self.current = Some(LoadedPage {
            url: final_url,
            html,
        });

        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|page| page.url.as_str())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>> {
        self.select_current(selector)
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> BrowserResult<ElementHandle> {
        self.select_current(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::Timeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
    }

    async fn find_link_by_text(&self, text: &str) -> BrowserResult<Option<ElementHandle>> {
        let wanted = text.trim();
        Ok(self
            .select_current("a[href]")?
            .into_iter()
            .find(|link| link.inner_text() == wanted && link.href().is_some()))
    }

    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        let target = element
            .href()
            .ok_or_else(|| BrowserError::NotClickable(element.inner_text()))?;
        self.goto(&target).await
    }
}
