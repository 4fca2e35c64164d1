//! Weight ranking
//!
//! Ranks the two weight tables of a dump, e.g. to list the most likely and
//! most unlikely transitions.

use crate::dump::ParsedDump;
use std::collections::BTreeMap;

/// Which end of the weight range to rank from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Largest weights first
    Positive,
    /// Smallest weights first
    Negative,
}

/// A weight keyed by an ordered pair of names
#[derive(Debug, Clone, PartialEq)]
pub struct RankedWeight<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub weight: f64,
}

/// The `n` strongest transitions. `left` is the source label, `right` the target.
pub fn top_transitions(dump: &ParsedDump, n: usize, polarity: Polarity) -> Vec<RankedWeight<'_>> {
    rank(&dump.transitions, n, polarity)
}

/// The `n` strongest state features. `left` is the attribute, `right` the label.
pub fn top_state_features(
    dump: &ParsedDump,
    n: usize,
    polarity: Polarity,
) -> Vec<RankedWeight<'_>> {
    rank(&dump.state_features, n, polarity)
}

fn rank(
    table: &BTreeMap<(String, String), f64>,
    n: usize,
    polarity: Polarity,
) -> Vec<RankedWeight<'_>> {
    let mut ranked: Vec<RankedWeight<'_>> = table
        .iter()
        .map(|((left, right), &weight)| RankedWeight {
            left,
            right,
            weight,
        })
        .collect();

    // Stable sort keeps key order among equal weights
    match polarity {
        Polarity::Positive => ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
        Polarity::Negative => ranked.sort_by(|a, b| a.weight.total_cmp(&b.weight)),
    }
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    fn create_test_dump() -> ParsedDump {
        let mut dump = ParsedDump::new();
        dump.transitions.insert(pair("A", "B"), 2.0);
        dump.transitions.insert(pair("B", "A"), -1.0);
        dump.transitions.insert(pair("A", "A"), 0.5);
        dump.transitions.insert(pair("B", "B"), 2.0);
        dump.state_features.insert(pair("bias", "A"), -3.0);
        dump.state_features.insert(pair("bias", "B"), 1.0);
        dump
    }

    #[test]
    fn test_top_positive_transitions() {
        let dump = create_test_dump();
        let top = top_transitions(&dump, 3, Polarity::Positive);

        let keys: Vec<(&str, &str)> = top.iter().map(|w| (w.left, w.right)).collect();
        assert_eq!(keys, vec![("A", "B"), ("B", "B"), ("A", "A")]);
        assert_eq!(top[0].weight, 2.0);
    }

    #[test]
    fn test_top_negative_state_features() {
        let dump = create_test_dump();
        let top = top_state_features(&dump, 1, Polarity::Negative);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].right, "A");
        assert_eq!(top[0].weight, -3.0);
    }

    #[test]
    fn test_count_larger_than_table() {
        let dump = create_test_dump();
        assert_eq!(top_transitions(&dump, 100, Polarity::Negative).len(), 4);
        assert!(top_transitions(&ParsedDump::new(), 5, Polarity::Positive).is_empty());
    }
}
