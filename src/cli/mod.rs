//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// CRFsuite dump decoder CLI
#[derive(Parser, Debug)]
#[command(name = "crfsuite-dump")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true, env = "CRFSUITE_DUMP_LOG")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a dump and print it
    Parse {
        /// Dump file (stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the strongest transitions and state features
    Top {
        /// Dump file (stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Entries per list (overrides config)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Report every line that could not be decoded
    Check {
        /// Dump file (stdin when omitted or "-")
        input: Option<PathBuf>,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text tables
    Table,
    /// DOT format (Graphviz) of the transition graph
    Dot,
}

impl OutputFormat {
    /// Resolve a format name coming from the config file
    pub fn from_config(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| Error::config(format!("Unknown output format: {}", name)))
    }
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Parse { input, format } => {
            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_config(&config.output.format)?,
            };
            commands::parse::execute(input, format)
        }
        Commands::Top { input, count } => {
            commands::top::execute(input, count.unwrap_or(config.output.top))
        }
        Commands::Check { input } => commands::check::execute(input),
    }
}
