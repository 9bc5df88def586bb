//! Application configuration
//!
//! Sources are layered, later ones winning:
//! 1. built-in defaults
//! 2. an optional `config.toml` in the working directory
//! 3. `EXPERT_REGISTRY__*` environment variables, e.g.
//!    `EXPERT_REGISTRY__DATABASE__PATH=/var/lib/registry.db`

mod database;
mod logging;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EXPERT_REGISTRY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file` as the optional file source
    ///
    /// `file` may omit its extension; a missing file is not an error.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(file, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(
        file: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let builder = config::Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default("database.run_migrations", defaults.database.run_migrations)?
            .set_default("logging.filter", defaults.logging.filter)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(config::File::with_name(file).required(false))
            .add_source(environment);

        builder.build()?.try_deserialize()
    }
}
