//! Configuration module for the repack scraper
//!
//! The store location comes from `DATABASE_URL` (a `.env` file is honored). Crawler tunables
//! such as start URLs and delays default to the values the target site needs and can be
//! overridden by a TOML file named in `REPACK_SCRAPER_CONFIG`.
//!
//! # Example
//!
//! ```no_run
//! use repack_scraper::config::load_config;
//!
//! let config = load_config().unwrap();
//! println!("Settle delay: {:?}", config.crawler.settle_delay());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DatabaseConfig, FileConfig, UserAgentConfig, DEFAULT_AZ_START_URL,
    DEFAULT_LATEST_START_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    config_from_parts, load_config, load_file_config, parse_database_url, CONFIG_PATH_VAR,
    DATABASE_URL_VAR,
};
