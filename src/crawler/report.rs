//! Run summaries for the two crawl modes

use std::fmt;

/// Totals for an alphabetized-index crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexCrawlReport {
    /// Pages extracted and persisted
    pub pages: usize,
    /// Item handles found across all pages
    pub items_seen: usize,
    /// Items that produced a record
    pub records_extracted: usize,
    /// Items dropped by the extractor
    pub items_skipped: usize,
    /// Rows newly inserted into the store
    pub inserted: usize,
}

impl IndexCrawlReport {
    pub fn record_page(&mut self, items: usize, records: usize, skipped: usize, inserted: usize) {
        self.pages += 1;
        self.items_seen += items;
        self.records_extracted += records;
        self.items_skipped += skipped;
        self.inserted += inserted;
    }
}

impl fmt::Display for IndexCrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} items, {} extracted, {} skipped, {} new",
            self.pages, self.items_seen, self.records_extracted, self.items_skipped, self.inserted
        )
    }
}

/// Totals for a feed crawl with detail-page visits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepCrawlReport {
    /// Detail-page URLs collected from the feed
    pub seeds: usize,
    /// Detail pages that yielded a title
    pub records_extracted: usize,
    /// Detail pages skipped after a timeout or navigation failure
    pub seeds_skipped: usize,
    /// Rows newly inserted into the store
    pub inserted: usize,
}

impl fmt::Display for DeepCrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seeds, {} extracted, {} skipped, {} new",
            self.seeds, self.records_extracted, self.seeds_skipped, self.inserted
        )
    }
}
