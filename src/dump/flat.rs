//! Flat-record decoders for the FILEHEADER, LABELS, ATTRIBUTES, TRANSITIONS
//! and STATE_FEATURES sections.
//!
//! Patterns are anchored at the line start only. Trailing text after a weight
//! is tolerated, and names may contain spaces (including trailing ones).

use super::model::Record;
use super::section::Section;
use crate::error::LineError;
use regex::Regex;
use std::sync::LazyLock;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+): (.*)").expect("header pattern is valid"));

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+): (.*)").expect("symbol pattern is valid"));

/// `(IDX) LEFT --> RIGHT: WEIGHT`; the dump counter `IDX` is discarded
static WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\d+\) (.+) --> (.+): ([+-]?\d+\.\d+)").expect("weight pattern is valid")
});

/// `KEY: VALUE`
pub fn parse_header(line: &str) -> Result<Record, LineError> {
    let caps = HEADER_RE.captures(line).ok_or(LineError::ShapeMismatch {
        section: Section::FileHeader.name(),
    })?;
    Ok(Record::Header {
        key: caps[1].to_string(),
        value: caps[2].to_string(),
    })
}

/// `ID: NAME` in the LABELS section
pub fn parse_label(line: &str) -> Result<Record, LineError> {
    let (id, name) = parse_symbol(line, Section::Labels)?;
    Ok(Record::Label { name, id })
}

/// `ID: NAME` in the ATTRIBUTES section
pub fn parse_attribute(line: &str) -> Result<Record, LineError> {
    let (id, name) = parse_symbol(line, Section::Attributes)?;
    Ok(Record::Attribute { name, id })
}

/// `(IDX) FROM --> TO: WEIGHT`
pub fn parse_transition(line: &str) -> Result<Record, LineError> {
    let (from, to, weight) = parse_weight(line, Section::Transitions)?;
    Ok(Record::Transition { from, to, weight })
}

/// `(IDX) ATTR --> LABEL: WEIGHT`
pub fn parse_state_feature(line: &str) -> Result<Record, LineError> {
    let (attribute, label, weight) = parse_weight(line, Section::StateFeatures)?;
    Ok(Record::StateFeature {
        attribute,
        label,
        weight,
    })
}

fn parse_symbol(line: &str, section: Section) -> Result<(u64, String), LineError> {
    let caps = SYMBOL_RE.captures(line).ok_or(LineError::ShapeMismatch {
        section: section.name(),
    })?;
    let id = caps[1]
        .parse()
        .map_err(|_| LineError::InvalidInteger(caps[1].to_string()))?;
    Ok((id, caps[2].to_string()))
}

fn parse_weight(line: &str, section: Section) -> Result<(String, String, f64), LineError> {
    let caps = WEIGHT_RE.captures(line).ok_or(LineError::ShapeMismatch {
        section: section.name(),
    })?;
    let weight = caps[3]
        .parse()
        .map_err(|_| LineError::InvalidWeight(caps[3].to_string()))?;
    Ok((caps[1].to_string(), caps[2].to_string(), weight))
}
