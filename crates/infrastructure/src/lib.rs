//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application store ports on SQLite and provides
//! configuration loading and logging setup.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteExpertStore, SqliteGrntiStore, SqliteRegionCityStore,
    create_pool,
};
pub use telemetry::{TelemetryError, init_telemetry};
