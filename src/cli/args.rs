//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};

/// bookshelf - REST service for books and their authors
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Connect to the store and serve the HTTP API
    Serve {
        /// Host to bind to, overriding HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
