//! CLI argument definitions for the remodel tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use remodel_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "remodel",
    version,
    about = "Reshape JSON records with declarative per-key rules",
    long_about = "Reshape JSON records with declarative per-key rules.\n\n\
                  Keys can be copied, renamed, excluded or filled with constants.\n\
                  Only keys named by the configuration appear in the output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log level for remodel's own crates: off, error, warn, info, debug or
    /// trace. Overrides -v/-q and RUST_LOG.
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<LevelFilter>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value_t = LogFormat::Pretty,
        global = true
    )]
    pub log_format: LogFormat,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Remodel the records of a JSON file using a configuration file.
    Apply(ApplyArgs),

    /// Print the calendar event example.
    Demo(DemoArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the JSON remodel configuration.
    #[arg(long = "config", short = 'c', value_name = "CONFIG")]
    pub config: PathBuf,

    /// JSON file holding one record or an array of records.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long = "compact")]
    pub compact: bool,
}

#[derive(Parser)]
pub struct DemoArgs {
    /// Event start as an RFC 3339 timestamp (default: now).
    #[arg(long = "when", value_name = "TIMESTAMP")]
    pub when: Option<String>,
}
