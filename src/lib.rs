//! CRFsuite Dump Decoder
//!
//! Turns the textual output of `crfsuite dump` into structured data.
//!
//! This library provides functionality for:
//! - Streaming, line-by-line decoding of model dumps ([`dump::DumpParser`])
//! - Header metadata, label and attribute symbol tables
//! - Transition and state-feature weights
//! - The semi-Markov extension block (segment lengths, forward states and their
//!   prefix/suffix linkage)
//! - Ranking weights and rendering the transition graph ([`analysis`])
//!
//! ```
//! use crfsuite_dump::dump::DumpParser;
//!
//! let mut parser = DumpParser::new();
//! for line in ["LABELS = {", "  0: B-PER", "  1: O", "}"] {
//!     parser.feed(line);
//! }
//! let dump = parser.into_dump();
//! assert_eq!(dump.labels["O"], 1);
//! assert!(dump.error_lines.is_empty());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;

pub use config::Config;
pub use dump::{DumpParser, ParsedDump};
pub use error::{Error, LineError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level.
///
/// Logs go to stderr so that stdout stays clean for command output.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
