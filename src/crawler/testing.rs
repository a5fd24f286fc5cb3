//! In-memory page driver and storage doubles for crawler tests

use crate::browser::{select_all, ElementHandle, PageDriver};
use crate::storage::{CandidateRecord, RepackEntry, Storage, StorageError, StorageResult};
use crate::{BrowserError, BrowserResult};
use async_trait::async_trait;
use scraper::Html;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Serves canned HTML by URL and records every navigation
#[derive(Debug, Default)]
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    current: Option<(Url, String)>,
    pub visits: Vec<String>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    fn select(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>> {
        let (url, html) = self.current.as_ref().ok_or(BrowserError::NoPage)?;
        let document = Html::parse_document(html);
        select_all(&document, selector, Some(url))
    }
}

#[async_trait]
impl PageDriver for FakeBrowser {
    async fn goto(&mut self, url: &str) -> BrowserResult<()> {
        self.visits.push(url.to_string());

        let navigation_error = |message: &str| BrowserError::Navigation {
            url: url.to_string(),
            message: message.to_string(),
        };

        if self.failing.contains(url) {
            return Err(navigation_error("connection reset"));
        }

        let html = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| navigation_error("not found"))?;
        let parsed = Url::parse(url).map_err(|e| navigation_error(&e.to_string()))?;

        self.current = Some((parsed, html));
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|(url, _)| url.as_str())
    }

    async fn query_selector_all(&self, selector: &str) -> BrowserResult<Vec<ElementHandle>> {
        self.select(selector)
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> BrowserResult<ElementHandle> {
        self.select(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::Timeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
    }

    async fn find_link_by_text(&self, text: &str) -> BrowserResult<Option<ElementHandle>> {
        Ok(self
            .select("a[href]")?
            .into_iter()
            .find(|link| link.inner_text() == text && link.href().is_some()))
    }

    async fn click(&mut self, element: &ElementHandle) -> BrowserResult<()> {
        let target = element
            .href()
            .ok_or_else(|| BrowserError::NotClickable(element.inner_text()))?;
        self.goto(&target).await
    }
}

/// Keeps every persisted batch in memory, deduplicating by link
#[derive(Debug, Default)]
pub struct RecordingStorage {
    pub batches: Mutex<Vec<Vec<CandidateRecord>>>,
    entries: Mutex<Vec<RepackEntry>>,
    fail: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every commit fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }
}

impl Storage for RecordingStorage {
    fn ensure_schema(&self) -> StorageResult<()> {
        Ok(())
    }

    fn save_batch(&self, batch: &[CandidateRecord]) -> StorageResult<usize> {
        self.batches.lock().unwrap().push(batch.to_vec());
        if self.fail {
            return Err(StorageError::Database("commit failed".to_string()));
        }

        let mut entries = self.entries.lock().unwrap();
        let mut inserted = 0;
        for record in batch.iter().filter(|r| r.is_usable()) {
            if entries.iter().all(|e| e.link != record.link) {
                let id = entries.len() as i64 + 1;
                entries.push(RepackEntry {
                    id,
                    title: record.title.clone(),
                    link: record.link.clone(),
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    fn find_by_link(&self, link: &str) -> StorageResult<Option<RepackEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.link == link)
            .cloned())
    }

    fn count_entries(&self) -> StorageResult<u64> {
        Ok(self.entries.lock().unwrap().len() as u64)
    }

    fn list_entries(&self) -> StorageResult<Vec<RepackEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }
}
