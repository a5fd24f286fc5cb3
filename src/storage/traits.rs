//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{CandidateRecord, RepackEntry};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// A backend is a handle constructed once at startup and passed into every persistence
/// call. Connections are scoped to a single call and are never held between calls.
pub trait Storage {
    /// Creates the catalog table if it does not exist yet
    fn ensure_schema(&self) -> StorageResult<()>;

    /// Persists the records whose link is not stored yet
    ///
    /// The whole batch runs in one transaction: each link is looked up and, if absent, an
    /// insert is staged; a single commit ends the call. Any failure rolls the batch back.
    /// Records with a blank title or link are skipped.
    ///
    /// # Returns
    ///
    /// The number of newly inserted entries
    fn save_batch(&self, batch: &[CandidateRecord]) -> StorageResult<usize>;

    /// Looks up an entry by exact link
    fn find_by_link(&self, link: &str) -> StorageResult<Option<RepackEntry>>;

    /// Counts all stored entries
    fn count_entries(&self) -> StorageResult<u64>;

    /// Lists all stored entries in insertion order
    fn list_entries(&self) -> StorageResult<Vec<RepackEntry>>;
}
