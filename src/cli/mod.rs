//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - serve: connect to the configured store and serve the book API

mod args;
mod commands;
mod config;
mod errors;
mod telemetry;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve};
pub use config::{AppConfig, RunMode};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use telemetry::init_tracing;
