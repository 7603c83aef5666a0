//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--config <path>`: Engine configuration file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clk - Geometric scalar recovery over the clock lattice
#[derive(Parser, Debug)]
#[command(name = "clk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; only errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (TOML with [anchors] and [search])
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize the anchor set
    #[command(
        name = "anchors",
        long_about = "Build the anchor set from the active configuration and summarize it.\n\n\
            Reports the solid vertices, the shared vertices found at the configured \
            tolerance, their ring distribution and stability range, the attractor grid, \
            the GCD/LCM constants and the anchor fingerprint.",
        after_help = "\
EXAMPLES:
    # Summary of the default geometry
    clk anchors

    # Machine-readable summary
    clk anchors --json

    # Geometry of a custom configuration
    clk --config clk.toml anchors"
    )]
    Anchors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported curves and their aliases
    Curves,

    /// Recover a scalar for one point
    #[command(
        name = "recover",
        long_about = "Run a recovery request for one curve point.\n\n\
            The query is either a scalar (the point k·G is computed first) or a \
            SEC1-encoded point in hex. Training scalars, when given, calibrate the \
            confidence through the Hamming distance to the candidate.",
        after_help = "\
EXAMPLES:
    # Recover the generator
    clk recover --curve secp256k1 --k 1

    # Recover a SEC1 point with training data and a deadline
    clk recover --curve p256 --point 04ab... --train 42 --train 0x1f --timeout-ms 500

    # Full diagnostics as JSON
    clk recover --curve secp256k1 --k 42 --json"
    )]
    Recover {
        /// Curve name or alias
        #[arg(long)]
        curve: String,

        /// Query scalar (decimal or 0x-hex); the query point is k·G
        #[arg(long, required_unless_present = "point", conflicts_with = "point")]
        k: Option<String>,

        /// Query point as SEC1 hex
        #[arg(long, value_name = "HEX")]
        point: Option<String>,

        /// Training scalar (repeatable)
        #[arg(long = "train", value_name = "K")]
        train: Vec<String>,

        /// Cancel the search after this many milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recover many scalars in parallel
    #[command(
        name = "batch",
        after_help = "\
EXAMPLES:
    # Three requests and a confidence summary
    clk batch --curve secp256k1 --k 1 --k 2 --k 0x2a

    # Summary and results as JSON
    clk batch --curve secp256k1 --k 1 7 99 --json"
    )]
    Batch {
        /// Curve name or alias
        #[arg(long)]
        curve: String,

        /// Query scalars (decimal or 0x-hex)
        #[arg(long = "k", value_name = "K", required = true, num_args = 1..)]
        scalars: Vec<String>,

        /// Training scalar (repeatable)
        #[arg(long = "train", value_name = "K")]
        train: Vec<String>,

        /// Cancel every request after this many milliseconds
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
