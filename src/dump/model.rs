//! Dump data model
//!
//! [`ParsedDump`] is the single output record of a parse session. Decoded lines
//! reach it as [`Record`] values through [`ParsedDump::apply`], which enforces the
//! cross-section invariants (symbols declared before they are used).

use crate::error::LineError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Decoded model parameters of a CRFsuite dump
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDump {
    /// FILEHEADER metadata
    pub header: BTreeMap<String, String>,

    /// Label name -> internal id
    pub labels: BTreeMap<String, u64>,

    /// Attribute name -> internal id
    pub attributes: BTreeMap<String, u64>,

    /// (from label, to label) -> weight
    pub transitions: BTreeMap<(String, String), f64>,

    /// (attribute, label) -> weight
    pub state_features: BTreeMap<(String, String), f64>,

    pub semi_markov: SemiMarkov,

    /// Raw lines that could not be decoded, in input order
    pub error_lines: Vec<String>,
}

/// The SEMI_MARKOV_MODEL block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SemiMarkov {
    /// Non-indexed `KEY = VALUE` assignments
    pub scalars: BTreeMap<String, String>,

    /// Label name -> maximum segment length
    pub max_seg_len: BTreeMap<String, i64>,

    /// Forward state index -> state description
    pub forward_state: BTreeMap<i64, ForwardState>,
}

/// A state reachable after emitting a label segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForwardState {
    pub length: i64,
    pub labels: Vec<String>,
    pub prefix: BTreeMap<i64, PrefixEntry>,
    pub suffix: BTreeMap<i64, SuffixEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrefixEntry {
    pub state: Vec<String>,
}

/// Suffix linkage, pointing back at a transition and a position inside it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuffixEntry {
    pub state: Vec<String>,
    pub transition_index: i64,
    pub transition_position: i64,
}

/// One decoded dump line
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Header { key: String, value: String },
    Label { name: String, id: u64 },
    Attribute { name: String, id: u64 },
    Transition { from: String, to: String, weight: f64 },
    StateFeature { attribute: String, label: String, weight: f64 },
    SemiMarkov(SemiMarkovRecord),
}

/// One decoded SEMI_MARKOV_MODEL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemiMarkovRecord {
    Scalar {
        key: String,
        value: String,
    },
    MaxSegLen {
        label: String,
        length: i64,
    },
    ForwardState {
        index: i64,
        length: i64,
        labels: Vec<String>,
    },
    Prefix {
        index: i64,
        affix: i64,
        entry: PrefixEntry,
    },
    Suffix {
        index: i64,
        affix: i64,
        entry: SuffixEntry,
    },
}

impl ParsedDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded record.
    ///
    /// Fails without touching the dump when the record references a label,
    /// attribute or forward state that has not been declared yet.
    pub fn apply(&mut self, record: Record) -> Result<(), LineError> {
        match record {
            Record::Header { key, value } => {
                self.header.insert(key, value);
            }
            Record::Label { name, id } => {
                self.labels.insert(name, id);
            }
            Record::Attribute { name, id } => {
                self.attributes.insert(name, id);
            }
            Record::Transition { from, to, weight } => {
                self.require_label(&from)?;
                self.require_label(&to)?;
                self.transitions.insert((from, to), weight);
            }
            Record::StateFeature {
                attribute,
                label,
                weight,
            } => {
                if !self.attributes.contains_key(&attribute) {
                    return Err(LineError::UnknownAttribute(attribute));
                }
                self.require_label(&label)?;
                self.state_features.insert((attribute, label), weight);
            }
            Record::SemiMarkov(record) => self.semi_markov.apply(record)?,
        }
        Ok(())
    }

    fn require_label(&self, label: &str) -> Result<(), LineError> {
        if self.labels.contains_key(label) {
            Ok(())
        } else {
            Err(LineError::UnknownLabel(label.to_string()))
        }
    }

    /// Label names ordered by internal id
    pub fn labels_by_id(&self) -> Vec<(&str, u64)> {
        let mut labels: Vec<(&str, u64)> = self
            .labels
            .iter()
            .map(|(name, &id)| (name.as_str(), id))
            .collect();
        labels.sort_by_key(|&(name, id)| (id, name));
        labels
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.labels.is_empty()
            && self.attributes.is_empty()
            && self.transitions.is_empty()
            && self.state_features.is_empty()
            && self.semi_markov.is_empty()
    }
}

impl SemiMarkov {
    fn apply(&mut self, record: SemiMarkovRecord) -> Result<(), LineError> {
        match record {
            SemiMarkovRecord::Scalar { key, value } => {
                self.scalars.insert(key, value);
            }
            SemiMarkovRecord::MaxSegLen { label, length } => {
                self.max_seg_len.insert(label, length);
            }
            SemiMarkovRecord::ForwardState {
                index,
                length,
                labels,
            } => {
                self.forward_state.insert(
                    index,
                    ForwardState {
                        length,
                        labels,
                        ..ForwardState::default()
                    },
                );
            }
            SemiMarkovRecord::Prefix {
                index,
                affix,
                entry,
            } => {
                self.state_mut(index)?.prefix.insert(affix, entry);
            }
            SemiMarkovRecord::Suffix {
                index,
                affix,
                entry,
            } => {
                self.state_mut(index)?.suffix.insert(affix, entry);
            }
        }
        Ok(())
    }

    fn state_mut(&mut self, index: i64) -> Result<&mut ForwardState, LineError> {
        self.forward_state
            .get_mut(&index)
            .ok_or(LineError::UnknownForwardState(index))
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.max_seg_len.is_empty() && self.forward_state.is_empty()
    }
}
