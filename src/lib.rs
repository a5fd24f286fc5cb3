//! Repack Scraper: a catalog crawler for game repack listings
//!
//! This crate walks the repack catalog in two modes (the alphabetized A-Z index and the
//! "latest" home feed), extracts `{title, link}` pairs and stores the ones it has not seen
//! before in a SQLite database.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod logging;
pub mod storage;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unsupported database URL: {0}")]
    UnsupportedDatabase(String),
}

/// Errors raised by a page driver while navigating or probing the DOM
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out after {timeout_ms}ms waiting for '{selector}'")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("No page loaded")]
    NoPage,

    #[error("Element is not clickable: {0}")]
    NotClickable(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for browser operations
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

// Re-export commonly used types
pub use browser::{ElementHandle, HttpPageDriver, PageDriver};
pub use config::Config;
pub use crawler::{CandidateRecord, Extraction};
pub use storage::{RepackEntry, SqliteStorage, Storage};
