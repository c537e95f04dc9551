//! Command-line interface definition using clap
//!
//! The demo binary is a stand-in presentation layer: it maps subcommands
//! onto the logger's three hooks (set level, export to text, export to
//! file) plus message ingestion.

use clap::{Parser, Subcommand};
use logvault::constants::DEFAULT_RETENTION_LIMIT;
use logvault::LogLevel;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Leveled, persistent application logger
#[derive(Parser, Debug)]
#[command(name = "logvault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose internal diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Store file path (default: next to the executable)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Severity threshold to apply before running the command
    #[arg(long, value_name = "LEVEL")]
    pub threshold: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands mapping the presentation hooks
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append one message to the log
    Write {
        /// Severity of the message
        #[arg(long, default_value = "info")]
        level: LogLevel,

        /// Message text
        message: String,
    },

    /// Print the most recent entries as text
    Export {
        /// Maximum entries to render
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },

    /// Write the most recent entries to a file in the temp directory
    ExportFile {
        /// Maximum entries to render
        #[arg(long, default_value_t = DEFAULT_RETENTION_LIMIT)]
        limit: usize,
    },
}

// =============================================================================
// Tests
// =============================================================================
