//! Dump module - streaming decoder for `crfsuite dump` output
//!
//! [`DumpParser`] is fed one line at a time. It tracks the currently open
//! section and routes each line to that section's decoder. A line that cannot
//! be decoded is recorded in [`ParsedDump::error_lines`] and parsing continues,
//! so one bad line never loses the rest of the dump.

use crate::Result;
use crate::error::LineError;
use std::io::BufRead;

pub mod flat;
pub mod model;
pub mod section;
pub mod semi_markov;
pub mod slicing;

// Re-export key types
pub use model::{
    ForwardState, ParsedDump, PrefixEntry, Record, SemiMarkov, SemiMarkovRecord, SuffixEntry,
};
pub use section::Section;

/// A skipped line together with the reason it was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based position of the line in the fed input
    pub line_number: usize,
    pub line: String,
    pub error: LineError,
}

/// Decode a single line under `section`, without touching any parse state
pub fn parse_line(section: Section, line: &str) -> std::result::Result<Record, LineError> {
    match section {
        Section::FileHeader => flat::parse_header(line),
        Section::Labels => flat::parse_label(line),
        Section::Attributes => flat::parse_attribute(line),
        Section::Transitions => flat::parse_transition(line),
        Section::StateFeatures => flat::parse_state_feature(line),
        Section::SemiMarkovModel => semi_markov::parse_line(line).map(Record::SemiMarkov),
    }
}

/// Strip leading whitespace and trailing line terminators.
///
/// Names may legitimately end in whitespace, so nothing else is stripped from the right.
fn trim_line(raw: &str) -> &str {
    raw.trim_start().trim_end_matches(['\r', '\n'])
}

/// Line-oriented section dispatcher
#[derive(Debug, Default)]
pub struct DumpParser {
    section: Option<Section>,
    result: ParsedDump,
    diagnostics: Vec<Diagnostic>,
    lines_seen: usize,
}

impl DumpParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole dump held in memory
    pub fn parse_str(text: &str) -> Self {
        let mut parser = Self::new();
        for line in text.lines() {
            parser.feed(line);
        }
        parser
    }

    /// Parse a dump from a buffered reader. Only I/O failures are errors.
    ///
    /// A line that is not valid UTF-8 is recorded as skipped, lossily decoded.
    pub fn parse_reader(mut reader: impl BufRead) -> Result<Self> {
        let mut parser = Self::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            match std::str::from_utf8(&buf) {
                Ok(line) => parser.feed(line),
                Err(_) => {
                    parser.lines_seen += 1;
                    let text = String::from_utf8_lossy(&buf);
                    parser.reject(trim_line(&text), LineError::InvalidUtf8);
                }
            }
        }
        tracing::debug!(
            lines = parser.lines_seen,
            skipped = parser.diagnostics.len(),
            "Finished reading dump"
        );
        Ok(parser)
    }

    /// Feed the next line of the dump
    pub fn feed(&mut self, raw: &str) {
        self.lines_seen += 1;

        let line = trim_line(raw);
        if line.is_empty() {
            return;
        }

        if let Some(section) = Section::from_marker(line) {
            tracing::debug!(line = self.lines_seen, %section, "Entering section");
            self.section = Some(section);
        } else if line == section::CLOSE_MARKER {
            if let Some(section) = self.section.take() {
                tracing::debug!(line = self.lines_seen, %section, "Leaving section");
            }
        } else if let Err(error) = self.dispatch(line) {
            self.reject(line, error);
        }
    }

    fn reject(&mut self, line: &str, error: LineError) {
        tracing::debug!(line = self.lines_seen, %error, "Skipping dump line");
        self.result.error_lines.push(line.to_string());
        self.diagnostics.push(Diagnostic {
            line_number: self.lines_seen,
            line: line.to_string(),
            error,
        });
    }

    fn dispatch(&mut self, line: &str) -> std::result::Result<(), LineError> {
        let section = self.section.ok_or(LineError::NoOpenSection)?;
        let record = parse_line(section, line)?;
        self.result.apply(record)
    }

    /// Currently open section, if any
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    /// The dump decoded so far
    pub fn dump(&self) -> &ParsedDump {
        &self.result
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of lines fed, blank ones included
    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Finish the session and take the decoded dump
    pub fn into_dump(self) -> ParsedDump {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
FILEHEADER = {
  magic: lCRF
  version: 100
  type: FIRST-ORDER
  num_features: 0
}

LABELS = {
  0: B-LOC
  1: O
  2: I-LOC
}

ATTRIBUTES = {
  0: bias
  1: word.lower=paris
  2: word[-1]=in
}

TRANSITIONS = {
  (1) B-LOC --> I-LOC: 2.375000
  (1) O --> B-LOC: -0.500000
  (1) O --> O: 1.250000
}

STATE_FEATURES = {
  (0) bias --> O: 0.750000
  (0) word.lower=paris --> B-LOC: 3.000000
  (0) word[-1]=in --> B-LOC: 1.125000
}

SEMI_MARKOV_MODEL = {
  max_order = 2
  max_seg_len[B-LOC] = 3
  max_seg_len[O] = 1
  frw_state[0] (length=1) = O
  frw_state[1] (length=2) = B-LOC|O
  prefix[1][0] = O|COL-B
  suffix[1][0] = 2(pos=1) B-LOC|O.
}
";

    fn parser_in(section: &str) -> DumpParser {
        let mut parser = DumpParser::new();
        parser.feed(&format!("{} = {{", section));
        parser
    }

    #[test]
    fn test_sample_dump() {
        let parser = DumpParser::parse_str(SAMPLE_DUMP);
        let dump = parser.dump();

        assert!(dump.error_lines.is_empty(), "{:?}", dump.error_lines);
        assert_eq!(parser.section(), None);

        assert_eq!(dump.header.get("magic").map(String::as_str), Some("lCRF"));
        assert_eq!(dump.header.len(), 4);
        assert_eq!(dump.labels.get("I-LOC"), Some(&2));
        assert_eq!(dump.attributes.get("word[-1]=in"), Some(&2));

        assert_eq!(
            dump.transitions[&("B-LOC".to_string(), "I-LOC".to_string())],
            2.375
        );
        assert_eq!(dump.transitions.len(), 3);
        assert_eq!(
            dump.state_features[&("word[-1]=in".to_string(), "B-LOC".to_string())],
            1.125
        );

        let sm = &dump.semi_markov;
        assert_eq!(sm.scalars.get("max_order").map(String::as_str), Some("2"));
        assert_eq!(sm.max_seg_len.get("B-LOC"), Some(&3));
        assert_eq!(sm.forward_state.len(), 2);

        let state = &sm.forward_state[&1];
        assert_eq!(state.length, 2);
        assert_eq!(state.labels, vec!["B-LOC", "O"]);
        assert_eq!(state.prefix[&0].state, vec!["B-LOC", "O"]);
        assert_eq!(state.suffix[&0].state, vec!["B-LOC", "O"]);
        assert_eq!(state.suffix[&0].transition_index, 2);
        assert_eq!(state.suffix[&0].transition_position, 1);
    }

    #[test]
    fn test_labels_have_no_errors() {
        let mut parser = parser_in("LABELS");
        for (id, name) in ["B-PER", "I-PER", "O"].iter().enumerate() {
            parser.feed(&format!("{}: {}", id, name));
        }

        let dump = parser.dump();
        assert_eq!(dump.labels["B-PER"], 0);
        assert_eq!(dump.labels["I-PER"], 1);
        assert_eq!(dump.labels["O"], 2);
        assert!(dump.error_lines.is_empty());
    }

    #[test]
    fn test_transition_weight_exact() {
        let mut parser = parser_in("LABELS");
        parser.feed("0: A");
        parser.feed("1: B");
        parser.feed("}");
        parser.feed("TRANSITIONS = {");
        parser.feed("(0) A --> B: 1.500000");

        assert_eq!(
            parser.dump().transitions[&("A".to_string(), "B".to_string())],
            1.5
        );
    }

    #[test]
    fn test_transition_with_unknown_label() {
        let mut parser = parser_in("LABELS");
        parser.feed("0: A");
        parser.feed("}");
        parser.feed("TRANSITIONS = {");
        parser.feed("(0) A --> B: 1.500000");

        let dump = parser.dump();
        assert_eq!(dump.error_lines, vec!["(0) A --> B: 1.500000"]);
        assert!(dump.transitions.is_empty());
        assert_eq!(
            parser.diagnostics()[0].error,
            LineError::UnknownLabel("B".to_string())
        );
        assert_eq!(parser.diagnostics()[0].line_number, 5);
    }

    #[test]
    fn test_state_feature_with_unknown_attribute() {
        let mut parser = parser_in("LABELS");
        parser.feed("0: A");
        parser.feed("}");
        parser.feed("STATE_FEATURES = {");
        parser.feed("(0) bias --> A: 0.100000");

        assert_eq!(parser.dump().error_lines.len(), 1);
        assert!(parser.dump().state_features.is_empty());
    }

    #[test]
    fn test_max_seg_len() {
        let mut parser = parser_in("SEMI_MARKOV_MODEL");
        parser.feed("max_seg_len[NOUN] = 4");
        assert_eq!(parser.dump().semi_markov.max_seg_len["NOUN"], 4);
    }

    #[test]
    fn test_prefix_reversal_fixture() {
        let mut parser = parser_in("SEMI_MARKOV_MODEL");
        parser.feed("frw_state[2] (length=3) = A|B|C");
        parser.feed("prefix[2][0] = XYZ");

        let state = &parser.dump().semi_markov.forward_state[&2];
        assert_eq!(state.labels, vec!["A", "B", "C"]);
        assert_eq!(state.prefix[&0].state, vec!["ZYX"]);
        assert!(parser.dump().error_lines.is_empty());
    }

    #[test]
    fn test_prefix_before_forward_state() {
        let mut parser = parser_in("SEMI_MARKOV_MODEL");
        parser.feed("prefix[2][0] = XYZ");

        let dump = parser.dump();
        assert_eq!(dump.error_lines, vec!["prefix[2][0] = XYZ"]);
        assert!(dump.semi_markov.forward_state.is_empty());
        assert_eq!(
            parser.diagnostics()[0].error,
            LineError::UnknownForwardState(2)
        );
    }

    #[test]
    fn test_unknown_semi_markov_parameter() {
        let mut parser = parser_in("SEMI_MARKOV_MODEL");
        parser.feed("weights[0] = 1");
        assert_eq!(parser.dump().error_lines, vec!["weights[0] = 1"]);
    }

    #[test]
    fn test_repeated_line_overwrites() {
        let mut parser = parser_in("SEMI_MARKOV_MODEL");
        parser.feed("max_seg_len[NOUN] = 4");
        parser.feed("max_seg_len[NOUN] = 4");
        parser.feed("frw_state[0] (length=1) = A");
        parser.feed("frw_state[0] (length=1) = A");

        let sm = &parser.dump().semi_markov;
        assert_eq!(sm.max_seg_len.len(), 1);
        assert_eq!(sm.forward_state.len(), 1);
        assert_eq!(sm.forward_state[&0].labels, vec!["A"]);

        let mut once = parser_in("SEMI_MARKOV_MODEL");
        once.feed("max_seg_len[NOUN] = 4");
        once.feed("frw_state[0] (length=1) = A");
        assert_eq!(once.dump(), parser.dump());
    }

    #[test]
    fn test_line_outside_section() {
        let mut parser = DumpParser::new();
        parser.feed("0: A");
        parser.feed("LABELS = {");
        parser.feed("}");
        parser.feed("1: B");

        let dump = parser.dump();
        assert_eq!(dump.error_lines, vec!["0: A", "1: B"]);
        assert!(dump.labels.is_empty());
        assert!(
            parser
                .diagnostics()
                .iter()
                .all(|d| d.error == LineError::NoOpenSection)
        );
    }

    #[test]
    fn test_whitespace_handling() {
        let mut parser = DumpParser::new();
        parser.feed("   LABELS = {\r\n");
        parser.feed("");
        parser.feed("   \r\n");
        parser.feed("\t0: spaced name  \r\n");

        assert_eq!(parser.section(), Some(Section::Labels));
        assert_eq!(parser.dump().labels.get("spaced name  "), Some(&0));
        assert_eq!(parser.lines_seen(), 4);
    }

    #[test]
    fn test_reopening_marker_switches_section() {
        let mut parser = parser_in("LABELS");
        parser.feed("ATTRIBUTES = {");
        parser.feed("0: bias");

        assert_eq!(parser.section(), Some(Section::Attributes));
        assert_eq!(parser.dump().attributes.get("bias"), Some(&0));
        assert!(parser.dump().labels.is_empty());
    }

    #[test]
    fn test_close_with_trailing_space_is_content() {
        let mut parser = parser_in("LABELS");
        parser.feed("} ");
        assert_eq!(parser.section(), Some(Section::Labels));
        assert_eq!(parser.dump().error_lines, vec!["} "]);
    }

    #[test]
    fn test_parse_reader() {
        let parser = DumpParser::parse_reader(std::io::Cursor::new(SAMPLE_DUMP)).unwrap();
        assert_eq!(parser.into_dump(), DumpParser::parse_str(SAMPLE_DUMP).into_dump());
    }

    #[test]
    fn test_parse_reader_invalid_utf8_line() {
        let mut bytes = b"LABELS = {\n0: A\n1: B\xff\xfe\r\n2: C\n}\n".to_vec();
        bytes.extend_from_slice(b"\xc3");

        let parser = DumpParser::parse_reader(std::io::Cursor::new(bytes)).unwrap();
        let dump = parser.dump();

        assert_eq!(dump.labels.len(), 2);
        assert_eq!(dump.labels["A"], 0);
        assert_eq!(dump.labels["C"], 2);
        assert_eq!(dump.error_lines, vec!["1: B\u{fffd}\u{fffd}", "\u{fffd}"]);
        assert_eq!(parser.diagnostics()[0].line_number, 3);
        assert_eq!(parser.diagnostics()[0].error, LineError::InvalidUtf8);
        assert_eq!(parser.diagnostics()[1].line_number, 6);
        assert_eq!(parser.lines_seen(), 6);
    }
}
