// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::FlagKind;

/// Command-line arguments for `fswire`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fswire",
    version,
    about = "Encode filesystem change events into a length-prefixed wire format.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Fswire.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FSWIRE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a flag set between raw bits, names and wire form.
    Flags {
        /// Flag table to use.
        #[arg(value_enum)]
        family: FlagKind,

        #[command(subcommand)]
        action: FlagsAction,
    },

    /// Print every unit of a wire stream (stdin when FILE is omitted).
    Decode {
        file: Option<PathBuf>,

        /// Treat each unit as an event record and print `id<TAB>flags<TAB>path`.
        #[arg(long)]
        events: bool,
    },

    /// Encode `id<TAB>flags<TAB>path` lines as event records on stdout.
    Replay { file: Option<PathBuf> },

    /// Open a descriptor-backed handle on PATH and report it.
    Resolve {
        path: PathBuf,

        /// Re-read the path from the descriptor before reporting.
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum FlagsAction {
    /// Bits (decimal or 0x hex) to `[Name,...]`.
    Format { bits: String },
    /// `[Name,...]` to bits.
    Parse { text: String },
    /// Bits to the wire form.
    Encode { bits: String },
    /// Print the family's table.
    List,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
