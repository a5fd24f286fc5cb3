//! Logging setup shared by the scraper binaries

use tracing_subscriber::EnvFilter;

/// Builds the log filter for a verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
pub fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("repack_scraper=info,warn"),
            1 => EnvFilter::new("repack_scraper=debug,info"),
            2 => EnvFilter::new("repack_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
pub fn setup_logging(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
