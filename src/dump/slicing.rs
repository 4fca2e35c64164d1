//! Named substring operations for the semi-Markov line grammar
//!
//! Every delimiter used by the grammar is ASCII, so byte offsets returned by
//! `find`/`rfind` are always char boundaries. A range whose end precedes its
//! start yields the empty string rather than an error.

use crate::error::LineError;

/// Byte offset of the first occurrence of `delim`
pub fn first_index(line: &str, delim: char) -> Result<usize, LineError> {
    line.find(delim).ok_or(LineError::MissingDelimiter(delim))
}

/// Byte offset of the last occurrence of `delim`
pub fn last_index(line: &str, delim: char) -> Result<usize, LineError> {
    line.rfind(delim).ok_or(LineError::MissingDelimiter(delim))
}

/// `line[start..end]`, empty when the range is inverted
fn clamped(line: &str, start: usize, end: usize) -> &str {
    if end > start { &line[start..end] } else { "" }
}

/// Text strictly between the first `open` and the first `close`
pub fn between_first(line: &str, open: char, close: char) -> Result<&str, LineError> {
    let start = first_index(line, open)? + open.len_utf8();
    let end = first_index(line, close)?;
    Ok(clamped(line, start, end))
}

/// Text strictly between the last `open` and the last `close`
pub fn between_last(line: &str, open: char, close: char) -> Result<&str, LineError> {
    let start = last_index(line, open)? + open.len_utf8();
    let end = last_index(line, close)?;
    Ok(clamped(line, start, end))
}

/// Text strictly between the first `open` and the last `close`
pub fn between_first_and_last(line: &str, open: char, close: char) -> Result<&str, LineError> {
    let start = first_index(line, open)? + open.len_utf8();
    let end = last_index(line, close)?;
    Ok(clamped(line, start, end))
}

/// Text after the last `delim`
pub fn after_last(line: &str, delim: char) -> Result<&str, LineError> {
    let start = last_index(line, delim)? + delim.len_utf8();
    Ok(&line[start..])
}

/// Text after the last `delim`, minus the character right after it, reversed.
///
/// The skipped character is the space that normally follows `=` in prefix lines.
pub fn after_last_reversed(line: &str, delim: char) -> Result<String, LineError> {
    let mut chars = after_last(line, delim)?.chars();
    chars.next();
    Ok(chars.rev().collect())
}

/// Text after the last `delim` up to, but excluding, the final character of the line
pub fn after_last_excluding_final(line: &str, delim: char) -> Result<&str, LineError> {
    let start = last_index(line, delim)? + delim.len_utf8();
    let end = line.char_indices().next_back().map_or(0, |(idx, _)| idx);
    Ok(clamped(line, start, end))
}

/// Split `text` on `separator`, requiring exactly two fields
pub fn split_pair<'a>(text: &'a str, separator: &str) -> Result<(&'a str, &'a str), LineError> {
    let fields: Vec<&str> = text.split(separator).collect();
    match fields.as_slice() {
        [key, value] => Ok((key, value)),
        _ => Err(LineError::FieldCount {
            expected: 2,
            found: fields.len(),
        }),
    }
}

/// Trim, then split a `|`-delimited label list
pub fn split_labels(text: &str) -> Vec<String> {
    text.trim().split('|').map(str::to_string).collect()
}

/// Parse a signed integer, ignoring surrounding whitespace
pub fn parse_int(text: &str) -> Result<i64, LineError> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| LineError::InvalidInteger(trimmed.to_string()))
}
