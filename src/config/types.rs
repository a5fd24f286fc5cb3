use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default entry point of the alphabetized index
pub const DEFAULT_AZ_START_URL: &str = "https://fitgirl-repacks.site/all-my-repacks-a-z/";

/// Default entry point of the "latest repacks" home feed
pub const DEFAULT_LATEST_START_URL: &str = "https://fitgirl-repacks.site/";

/// Desktop browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure, assembled from the environment and an optional TOML file
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub crawler: CrawlerConfig,
    pub user_agent: UserAgentConfig,
}

/// Location of the SQLite store, resolved from `DATABASE_URL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

/// Tunables read from the optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// First page of the alphabetized index
    #[serde(rename = "az-start-url")]
    pub az_start_url: String,

    /// Home feed listing the latest repacks
    #[serde(rename = "latest-start-url")]
    pub latest_start_url: String,

    /// Pause after clicking "Next Page" so the new page can render (milliseconds)
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,

    /// Pause after every detail-page visit (milliseconds)
    #[serde(rename = "visit-delay-ms")]
    pub visit_delay_ms: u64,

    /// Upper bound for the detail-page title wait (milliseconds)
    #[serde(rename = "title-timeout-ms")]
    pub title_timeout_ms: u64,

    /// Transport timeout for a single page load (seconds, 0 waits indefinitely)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            az_start_url: DEFAULT_AZ_START_URL.to_string(),
            latest_start_url: DEFAULT_LATEST_START_URL.to_string(),
            settle_delay_ms: 1500,
            visit_delay_ms: 1000,
            title_timeout_ms: 5000,
            request_timeout_secs: 0,
        }
    }
}

impl CrawlerConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn visit_delay(&self) -> Duration {
        Duration::from_millis(self.visit_delay_ms)
    }

    pub fn title_timeout(&self) -> Duration {
        Duration::from_millis(self.title_timeout_ms)
    }

    /// Transport timeout for page loads, `None` when page loads are unbounded
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
