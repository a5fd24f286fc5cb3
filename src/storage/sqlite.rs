//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::config::DatabaseConfig;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{CandidateRecord, RepackEntry};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SQLite storage backend
///
/// Holds only the database location; every call opens its own connection and closes it
/// before returning.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Opens (or creates) the database file and ensures the schema exists
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if path.is_dir() {
            return Err(StorageError::Database(format!(
                "{} is a directory",
                path.display()
            )));
        }

        let storage = Self {
            path: path.to_path_buf(),
        };

        let conn = storage.connect()?;
        // WAL is persistent on the file, so it only needs setting once
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        drop(conn);

        storage.ensure_schema()?;

        Ok(storage)
    }

    /// Opens the database named by the configuration
    pub fn from_config(config: &DatabaseConfig) -> StorageResult<Self> {
        Self::new(&config.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection scoped to one storage call
    fn connect(&self) -> StorageResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        Ok(conn)
    }
}

impl Storage for SqliteStorage {
    fn ensure_schema(&self) -> StorageResult<()> {
        let conn = self.connect()?;
        initialize_schema(&conn)?;
        Ok(())
    }

    fn save_batch(&self, batch: &[CandidateRecord]) -> StorageResult<usize> {
        let mut conn = self.connect()?;

        // Dropping the transaction on an early return rolls the whole batch back
        let tx = conn.transaction()?;
        let mut inserted = 0;

        {
            let mut lookup = tx.prepare_cached("SELECT id FROM fitgirl_repacks WHERE link = ?1")?;
            let mut insert =
                tx.prepare_cached("INSERT INTO fitgirl_repacks (title, link) VALUES (?1, ?2)")?;

            for record in batch {
                if !record.is_usable() {
                    tracing::debug!("Skipping malformed record {:?}", record);
                    continue;
                }

                let existing: Option<i64> = lookup
                    .query_row(params![record.link], |row| row.get(0))
                    .optional()?;

                if existing.is_none() {
                    insert.execute(params![record.title, record.link])?;
                    inserted += 1;
                }
            }
        }

        tx.commit()?;

        tracing::info!("Saved {} new games to DB", inserted);
        Ok(inserted)
    }

    fn find_by_link(&self, link: &str) -> StorageResult<Option<RepackEntry>> {
        let conn = self.connect()?;
        let entry = conn
            .query_row(
                "SELECT id, title, link FROM fitgirl_repacks WHERE link = ?1",
                params![link],
                |row| {
                    Ok(RepackEntry {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        link: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    fn count_entries(&self) -> StorageResult<u64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM fitgirl_repacks", [], |row| {
            row.get(0)
        })?;
        Ok(count as u64)
    }

    fn list_entries(&self) -> StorageResult<Vec<RepackEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, title, link FROM fitgirl_repacks ORDER BY id")?;

        let entries = stmt
            .query_map([], |row| {
                Ok(RepackEntry {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    link: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
