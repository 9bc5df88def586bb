//! Expert registry command-line front end
//!
//! Argument definitions and command dispatch, shared by the binary and
//! its integration tests.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use commands::{Output, Services, execute};
