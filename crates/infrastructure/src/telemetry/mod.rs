//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber used by every binary.

mod subscriber;

pub use subscriber::{TelemetryError, build_env_filter, init_telemetry};
