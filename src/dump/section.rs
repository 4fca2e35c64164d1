//! Section markers
//!
//! A dump is a sequence of `NAME = {` ... `}` blocks. This module knows the six
//! block names and how to recognize an opening marker.

use std::fmt;

/// Literal that follows a section name on its opening line
const OPEN_SUFFIX: &str = " = {";

/// Literal closing line of every section
pub const CLOSE_MARKER: &str = "}";

/// A named block of the dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    FileHeader,
    Labels,
    Attributes,
    Transitions,
    StateFeatures,
    SemiMarkovModel,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::FileHeader,
        Section::Labels,
        Section::Attributes,
        Section::Transitions,
        Section::StateFeatures,
        Section::SemiMarkovModel,
    ];

    /// The marker name as it appears in the dump
    pub fn name(&self) -> &'static str {
        match self {
            Section::FileHeader => "FILEHEADER",
            Section::Labels => "LABELS",
            Section::Attributes => "ATTRIBUTES",
            Section::Transitions => "TRANSITIONS",
            Section::StateFeatures => "STATE_FEATURES",
            Section::SemiMarkovModel => "SEMI_MARKOV_MODEL",
        }
    }

    /// Recognize an opening marker such as `LABELS = {`.
    ///
    /// Only the line start is matched; anything after the brace is ignored.
    pub fn from_marker(line: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| {
            line.strip_prefix(section.name())
                .is_some_and(|rest| rest.starts_with(OPEN_SUFFIX))
        })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_markers_recognized() {
        for section in Section::ALL {
            let line = format!("{} = {{", section.name());
            assert_eq!(Section::from_marker(&line), Some(section));
        }
    }

    #[test]
    fn test_marker_requires_exact_suffix() {
        assert_eq!(Section::from_marker("LABELS = {"), Some(Section::Labels));
        assert_eq!(Section::from_marker("LABELS = { extra"), Some(Section::Labels));
        assert_eq!(Section::from_marker("LABELS ={"), None);
        assert_eq!(Section::from_marker("labels = {"), None);
        assert_eq!(Section::from_marker("LABELSX = {"), None);
        assert_eq!(Section::from_marker(" LABELS = {"), None);
    }

    #[test]
    fn test_state_features_not_confused_with_prefix() {
        assert_eq!(
            Section::from_marker("STATE_FEATURES = {"),
            Some(Section::StateFeatures)
        );
    }
}
