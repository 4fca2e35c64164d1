//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::Result;
use crate::dump::DumpParser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Read and decode a dump from a file, or from stdin when no path (or "-") is given
fn read_dump(input: Option<&Path>) -> Result<DumpParser> {
    let parser = match input {
        Some(path) if path != Path::new("-") => {
            tracing::info!("Reading dump from {:?}", path);
            DumpParser::parse_reader(BufReader::new(File::open(path)?))?
        }
        _ => {
            tracing::info!("Reading dump from stdin");
            DumpParser::parse_reader(io::stdin().lock())?
        }
    };

    let dump = parser.dump();
    tracing::info!(
        "Decoded {} labels, {} attributes, {} transitions, {} state features",
        dump.labels.len(),
        dump.attributes.len(),
        dump.transitions.len(),
        dump.state_features.len()
    );
    if !dump.error_lines.is_empty() {
        tracing::warn!(
            "{} line(s) could not be decoded; run `check` for details",
            dump.error_lines.len()
        );
    }

    Ok(parser)
}

/// Parse command implementation
pub mod parse {
    use super::*;
    use crate::analysis::TransitionGraph;
    use crate::cli::OutputFormat;

    /// Execute the parse command
    pub fn execute(input: Option<PathBuf>, format: OutputFormat) -> Result<()> {
        tracing::debug!("Using output format: {:?}", format);
        let dump = read_dump(input.as_deref())?.into_dump();

        match format {
            OutputFormat::Json => {
                crate::cli::output::output_json(&mut io::stdout(), &dump)?;
            }
            OutputFormat::Table => {
                crate::cli::output::output_table(&mut io::stdout(), &dump)?;
            }
            OutputFormat::Dot => {
                tracing::info!("Building transition graph for DOT output...");
                let graph = TransitionGraph::build_from_dump(&dump);
                let stats = graph.stats();
                tracing::debug!(
                    "Graph has {} labels, {} transitions, {} self loops",
                    stats.total_labels,
                    stats.total_transitions,
                    stats.self_loops
                );
                print!("{}", graph.to_dot());
            }
        }

        Ok(())
    }
}

/// Top command implementation
pub mod top {
    use super::*;

    /// Execute the top command
    pub fn execute(input: Option<PathBuf>, count: usize) -> Result<()> {
        let dump = read_dump(input.as_deref())?.into_dump();
        crate::cli::output::output_top(&mut io::stdout(), &dump, count)
    }
}

/// Check command implementation
pub mod check {
    use super::*;

    /// Execute the check command
    pub fn execute(input: Option<PathBuf>) -> Result<()> {
        let parser = read_dump(input.as_deref())?;
        let diagnostics = parser.diagnostics();

        println!("📋 Dump Check Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("Lines read: {}", parser.lines_seen());
        println!();

        if diagnostics.is_empty() {
            println!("✅ Every line was decoded");
            return Ok(());
        }

        println!("❌ Skipped lines:");
        crate::cli::output::output_diagnostics(&mut io::stdout(), diagnostics)?;
        println!();

        Err(crate::Error::MalformedDump {
            count: diagnostics.len(),
        })
    }
}
