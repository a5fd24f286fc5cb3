use crate::config::types::{Config, DatabaseConfig, FileConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Environment variable holding the store connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable pointing at an optional TOML file with crawler tunables
pub const CONFIG_PATH_VAR: &str = "REPACK_SCRAPER_CONFIG";

/// Loads the configuration from the process environment
///
/// A `.env` file in the working directory is read first if present. `DATABASE_URL` must be
/// set; `REPACK_SCRAPER_CONFIG` may point at a TOML file overriding crawler defaults.
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - A required variable is missing or a value is invalid
///
/// # Example
///
/// ```no_run
/// use repack_scraper::config::load_config;
///
/// let config = load_config().unwrap();
/// println!("Store: {}", config.database.path.display());
/// ```
pub fn load_config() -> Result<Config, ConfigError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var(DATABASE_URL_VAR).ok();
    let config_path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);

    config_from_parts(database_url.as_deref(), config_path.as_deref())
}

/// Builds a configuration from an explicit connection string and optional TOML path
///
/// # Arguments
///
/// * `database_url` - Value of `DATABASE_URL`, if set
/// * `config_path` - Path to a TOML file with crawler tunables, if any
pub fn config_from_parts(
    database_url: Option<&str>,
    config_path: Option<&Path>,
) -> Result<Config, ConfigError> {
    let database_url = database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingEnv(DATABASE_URL_VAR))?;
    let database = parse_database_url(database_url)?;

    let file = match config_path {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };

    let config = Config {
        database,
        crawler: file.crawler,
        user_agent: file.user_agent,
    };

    validate(&config)?;

    Ok(config)
}

/// Reads and parses the TOML tunables file
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let file: FileConfig = toml::from_str(&content)?;
    Ok(file)
}

/// Resolves a connection string to a SQLite database file
///
/// Follows the SQLAlchemy URL convention: `sqlite:///relative.db` names a file relative to
/// the working directory and `sqlite:////absolute/path.db` an absolute one. The shorter
/// `sqlite://relative.db`, `sqlite:relative.db` and a bare filesystem path are also accepted.
/// A trailing `?query` is ignored.
pub fn parse_database_url(url: &str) -> Result<DatabaseConfig, ConfigError> {
    let url = url.trim();
    let without_query = url.split('?').next().unwrap_or(url);

    let path = if let Some(rest) = without_query.strip_prefix("sqlite:///") {
        rest
    } else if let Some(rest) = without_query.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = without_query.strip_prefix("sqlite:") {
        rest
    } else if without_query.contains("://") {
        return Err(ConfigError::UnsupportedDatabase(url.to_string()));
    } else {
        without_query
    };

    if path.is_empty() {
        return Err(ConfigError::Validation(format!(
            "DATABASE_URL '{}' does not name a database file",
            url
        )));
    }

    if path == ":memory:" {
        return Err(ConfigError::Validation(
            "in-memory databases are not durable across persistence calls".to_string(),
        ));
    }

    Ok(DatabaseConfig {
        path: PathBuf::from(path),
    })
}
