//! Storage module for persisting catalog entries
//!
//! This module handles all database operations for the scraper, including:
//! - SQLite database initialization and schema management
//! - Deduplicating batch persistence keyed by link
//! - Read helpers for reporting

mod schema;
mod sqlite;
mod traits;

pub use schema::REPACKS_TABLE;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::DatabaseConfig;

/// Opens the store named by the configuration and ensures its schema
///
/// # Arguments
///
/// * `config` - The resolved database location
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(config: &DatabaseConfig) -> StorageResult<SqliteStorage> {
    SqliteStorage::from_config(config)
}

/// A persisted catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackEntry {
    /// Surrogate key assigned by the store
    pub id: i64,
    pub title: String,
    /// Canonical URL; unique across the table
    pub link: String,
}

/// A `{title, link}` pair produced by extraction, not yet checked against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub title: String,
    pub link: String,
}

impl CandidateRecord {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Both fields must be non-blank to be persisted
    pub fn is_usable(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }
}
