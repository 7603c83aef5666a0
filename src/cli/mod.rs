//! cli
//!
//! Command-line interface layer for clk.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load the engine configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds an
//! [`crate::engine::Engine`] from the configuration and hands requests to
//! it. All formatting goes through [`crate::ui::output`].

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Configuration file override.
    pub config: Option<PathBuf>,
}

impl Context {
    /// Output verbosity for these flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        config: cli.config.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
