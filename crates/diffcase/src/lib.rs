//! # diffcase
//!
//! **Tier 3 (CLI Binary)**
//!
//! Entry point for the `diffcase` command-line application. Wires the
//! built-in benchmark catalog to the synthesis driver and the diagnostic
//! runner.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Resolve settings (file, environment, flags)
//! * Dispatch commands
//! * Route logs to stderr and keep stdout for results
//!
//! This crate should contain minimal business logic.

#![forbid(unsafe_code)]

pub mod catalog;
mod cli;
mod commands;
mod config;
mod error_hints;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use cli::{CandidateKind, Cli, Commands};

/// Parse the process arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    commands::dispatch(cli)
}

/// Render an error chain with hints for the terminal.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
