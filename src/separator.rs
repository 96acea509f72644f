//! Finding the boundary between key and value in a logical line.

use crate::is_whitespace;

/// Key and value of a logical line, both still escaped.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct RawRecord<'a> {
    /// Raw key.
    pub key: &'a str,
    /// Raw value, leading whitespace removed.
    pub value: &'a str,
    /// Character offset of the value inside the logical line.
    pub value_offset: usize,
}

/// Split a logical line into key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. The separator is that whitespace run,
/// optionally followed by one `=` or `:` and more whitespace. Trailing whitespace of the value is kept.
/// A line without any separator is all key, with an empty value.
///
/// The line must not start with whitespace, `LineAssembler` already removed it.
#[must_use]
pub fn split_key_value(line: &str) -> RawRecord<'_> {
    let mut chars = line.char_indices();
    let mut key_end = line.len();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if is_whitespace(c) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let after_key = line[key_end..].trim_start_matches(is_whitespace);
    let value = after_key
        .strip_prefix(|c: char| c == '=' || c == ':')
        .unwrap_or(after_key)
        .trim_start_matches(is_whitespace);

    RawRecord {
        key: &line[..key_end],
        value,
        value_offset: line[..line.len() - value.len()].chars().count(),
    }
}
