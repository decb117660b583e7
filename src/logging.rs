//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never interleave with the REPL on stdout.
//! `RUST_LOG` wins over the configured level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter from the `var` environment variable, falling back to
/// `default_level`.
pub fn env_filter(var: &str, default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(default_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter(EnvFilter::DEFAULT_ENV, default_level))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn falls_back_to_default_level() {
        let filter = env_filter("SENTIMENT_LOG_UNSET_FOR_TESTS", "warn");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn env_file_setting_reaches_filter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SENTIMENT_LOG_FROM_ENV_FILE=debug").unwrap();
        assert!(crate::config::load_env_file(file.path()));

        let filter = env_filter("SENTIMENT_LOG_FROM_ENV_FILE", "warn");
        assert_eq!(filter.to_string(), "debug");
    }
}
