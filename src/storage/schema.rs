//! Database schema definitions
//!
//! This module contains the SQL schema for the repack catalog store.

/// Name of the single table holding catalog entries
pub const REPACKS_TABLE: &str = "fitgirl_repacks";

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per distinct repack link; titles are write-once
CREATE TABLE IF NOT EXISTS fitgirl_repacks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    link TEXT NOT NULL UNIQUE
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
