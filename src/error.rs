//! This module defines all error types used throughout the crate.
//!
//! There are two layers:
//! - [`Error`] covers whole-operation failures (I/O, configuration, output encoding).
//! - [`LineError`] explains why a single dump line was skipped. It never aborts a parse.

use std::io;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, broken pipe, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The dump contained lines that could not be decoded
    #[error("Malformed dump: {count} line(s) could not be parsed")]
    MalformedDump { count: usize },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Reason a single dump line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Content appeared while no section was open
    #[error("line is outside of any section")]
    NoOpenSection,

    /// The line does not have the shape its section expects
    #[error("line does not match the {section} record shape")]
    ShapeMismatch { section: &'static str },

    /// A weight line names a label missing from the LABELS table
    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    /// A weight line names an attribute missing from the ATTRIBUTES table
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    /// A prefix/suffix line refers to a forward state that was never declared
    #[error("unknown forward state {0}")]
    UnknownForwardState(i64),

    /// A required delimiter is absent
    #[error("missing delimiter '{0}'")]
    MissingDelimiter(char),

    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    #[error("invalid weight {0:?}")]
    InvalidWeight(String),

    /// A bracketed semi-Markov line with an unrecognized parameter name
    #[error("unknown semi-Markov parameter in {0:?}")]
    UnknownParameter(String),

    /// A split produced the wrong number of fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}
