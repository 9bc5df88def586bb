//! Application layer - Use cases and orchestration
//!
//! Defines the store ports and the per-entity services that validate
//! records before handing them to a store.

pub mod date_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use date_parser::{format_for_display, format_for_storage, parse_date, parse_required_date};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
