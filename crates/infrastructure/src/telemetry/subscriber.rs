//! `tracing-subscriber` setup

use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize subscriber: {0}")]
    Init(String),
}

/// Build the event filter, preferring `RUST_LOG` over the configured filter
///
/// An unparsable configured filter falls back to `info`.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    select_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), config)
}

fn select_filter(env_directives: Option<&str>, config: &LoggingConfig) -> EnvFilter {
    if let Some(directives) = env_directives {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => warn!(filter = %directives, error = %e, "Invalid RUST_LOG, using config"),
        }
    }

    EnvFilter::try_new(&config.filter).unwrap_or_else(|e| {
        warn!(filter = %config.filter, error = %e, "Invalid log filter, using info");
        EnvFilter::new("info")
    })
}

/// Install the global subscriber
///
/// Events go to stderr so command output on stdout stays machine-readable.
/// Fails if a global subscriber is already set.
pub fn init_telemetry(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(build_env_filter(config));

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(json = config.json, "Logging initialized");
    Ok(())
}
