//! Tracing subscriber setup
//!
//! Logs go to stderr so rendered HTML on stdout stays clean. `RUST_LOG`
//! overrides the level picked from `-v`/`-q`.

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, LogFormat};

/// Builds the filter for a config, preferring `RUST_LOG` when set
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config))
}

fn default_filter(config: &CliConfig) -> EnvFilter {
    let level = config.verbosity.log_filter();
    EnvFilter::new(format!(
        "{level},testimania={level},testimania_cli={level},tower_http=warn"
    ))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(config.verbosity.is_verbose());

    let result = match config.log_format {
        LogFormat::Text => builder
            .with_ansi(config.color.should_color())
            .try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;

    #[test]
    fn test_default_filter_follows_verbosity() {
        let quiet = default_filter(&CliConfig::new().with_verbosity(Verbosity::Quiet));
        assert!(quiet.to_string().contains("testimania=error"));
        let debug = default_filter(&CliConfig::new().with_verbosity(Verbosity::Debug));
        assert!(debug.to_string().contains("testimania=debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CliConfig::new().with_log_format(LogFormat::Json);
        init(&config);
        init(&config);
    }
}
