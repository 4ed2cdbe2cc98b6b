//! Binary crate for the `spaceweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing and validating CLI arguments
//! - Logging setup
//! - Human-friendly output formatting

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli::wants_bare_help(std::env::args_os()) {
        cli::Cli::command().print_help()?;
        return Ok(());
    }

    let cmd = cli::Cli::parse();
    cmd.run().await
}
