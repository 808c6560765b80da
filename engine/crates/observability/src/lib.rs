use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// `[logging]` section of the bridge configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `"info"` or `"script_context=debug"`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: true,
        }
    }
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global fmt subscriber. Panics if one is already installed.
pub fn init_logging(config: &LoggingConfig) {
    fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .init();
}

/// Like [`init_logging`], but returns false instead of panicking when a
/// subscriber is already installed. Safe to call from every test.
pub fn try_init_logging(config: &LoggingConfig) -> bool {
    fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.with_target)
        .with_test_writer()
        .try_init()
        .is_ok()
}
