//! SEMI_MARKOV_MODEL line decoder
//!
//! The block mixes five line shapes:
//!
//! ```text
//! max_order = 2                          scalar (no '[' anywhere)
//! max_seg_len[NOUN] = 4                  per-label segment bound
//! frw_state[3] (length=2) = B|A          forward state declaration
//! prefix[3][0] = A|B                     prefix linkage (value read reversed)
//! suffix[3][1] = 4(pos=1) A|B.           suffix linkage (last character dropped)
//! ```
//!
//! The prefix reversal and the suffix final-character drop are reproduced
//! exactly as `crfsuite dump` consumers have always decoded them.

use super::model::{PrefixEntry, SemiMarkovRecord, SuffixEntry};
use super::slicing::{
    after_last, after_last_excluding_final, after_last_reversed, between_first,
    between_first_and_last, between_last, parse_int, split_labels, split_pair,
};
use crate::error::LineError;

const MAX_SEG_LEN: &str = "max_seg_len";
const FORWARD_STATE: &str = "frw_state";
const PREFIX: &str = "prefix";
const SUFFIX: &str = "suffix";

/// Decode one line of the SEMI_MARKOV_MODEL block
pub fn parse_line(line: &str) -> Result<SemiMarkovRecord, LineError> {
    if !line.contains('[') {
        parse_scalar(line)
    } else if line.starts_with(MAX_SEG_LEN) {
        parse_max_seg_len(line)
    } else if line.starts_with(FORWARD_STATE) {
        parse_forward_state(line)
    } else if line.starts_with(PREFIX) {
        parse_prefix(line)
    } else if line.starts_with(SUFFIX) {
        parse_suffix(line)
    } else {
        Err(LineError::UnknownParameter(line.to_string()))
    }
}

fn parse_scalar(line: &str) -> Result<SemiMarkovRecord, LineError> {
    let (key, value) = split_pair(line, " = ")?;
    Ok(SemiMarkovRecord::Scalar {
        key: key.trim().to_string(),
        value: value.trim().to_string(),
    })
}

fn parse_max_seg_len(line: &str) -> Result<SemiMarkovRecord, LineError> {
    let (_, length) = split_pair(line, " = ")?;
    let length = parse_int(length)?;
    let label = between_first(line, '[', ']')?;
    Ok(SemiMarkovRecord::MaxSegLen {
        label: label.to_string(),
        length,
    })
}

fn parse_forward_state(line: &str) -> Result<SemiMarkovRecord, LineError> {
    let index = parse_int(between_first(line, '[', ']')?)?;
    let (_, length) = split_pair(between_first(line, '(', ')')?, "=")?;
    let length = parse_int(length)?;
    let labels = split_labels(after_last(line, '=')?);
    Ok(SemiMarkovRecord::ForwardState {
        index,
        length,
        labels,
    })
}

/// `(INDEX, AFFIX)` from `name[INDEX]...[AFFIX]`
fn affix_indices(line: &str) -> Result<(i64, i64), LineError> {
    let index = parse_int(between_first(line, '[', ']')?)?;
    let affix = parse_int(between_last(line, '[', ']')?)?;
    Ok((index, affix))
}

fn parse_prefix(line: &str) -> Result<SemiMarkovRecord, LineError> {
    let (index, affix) = affix_indices(line)?;
    let state = split_labels(&after_last_reversed(line, '=')?);
    Ok(SemiMarkovRecord::Prefix {
        index,
        affix,
        entry: PrefixEntry { state },
    })
}

fn parse_suffix(line: &str) -> Result<SemiMarkovRecord, LineError> {
    let (index, affix) = affix_indices(line)?;
    let state = split_labels(after_last_excluding_final(line, ')')?);
    let transition_index = parse_int(between_first_and_last(line, '=', '(')?)?;
    let transition_position = parse_int(between_last(line, '=', ')')?)?;
    Ok(SemiMarkovRecord::Suffix {
        index,
        affix,
        entry: SuffixEntry {
            state,
            transition_index,
            transition_position,
        },
    })
}
