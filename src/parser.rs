//! Records from logical lines: separator scan, then escape decoding of key and value.

use std::io;

use tracing::trace;

use crate::error::ParserError;
use crate::escape;
use crate::lines::{BufReadLines, LineAssembler, LineInput, PhysicalLines};
use crate::separator::split_key_value;
use crate::{InfallibleIO, ParserPosition};

/// A decoded key/value pair.
#[derive(Debug, Eq, PartialEq, Clone, PartialOrd, Ord, Hash, Default)]
pub struct Record {
    /// Decoded key.
    pub key: String,
    /// Decoded value.
    pub value: String,
}

/// useful for iter over `Vec<(String, String)>` or `&Properties`.
impl<K: ToString, V: ToString> From<(K, V)> for Record {
    fn from(value: (K, V)) -> Self {
        Self {
            key: value.0.to_string(),
            value: value.1.to_string(),
        }
    }
}

impl<K: ToString, V: ToString> From<&(K, V)> for Record {
    fn from(value: &(K, V)) -> Self {
        Self {
            key: value.0.to_string(),
            value: value.1.to_string(),
        }
    }
}

/// useful for iter over &Vec<Record>
impl From<&Self> for Record {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl From<Record> for (String, String) {
    fn from(value: Record) -> Self {
        (value.key, value.value)
    }
}

pub trait PropertyHandler {
    /// Called once per record, in source order.
    /// Returning false stops the parse after this record.
    fn handle(&mut self, position: &ParserPosition, record: Record) -> bool;
}

impl<T: FnMut(&ParserPosition, Record) -> bool> PropertyHandler for T {
    fn handle(&mut self, position: &ParserPosition, record: Record) -> bool {
        self(position, record)
    }
}

/// Property Handler collecting every record, duplicates included.
#[derive(Default, Debug)]
struct VecHandler(Vec<(String, String)>);

impl PropertyHandler for VecHandler {
    fn handle(&mut self, _: &ParserPosition, record: Record) -> bool {
        self.0.push(record.into());
        true
    }
}

/// Low-level parsing function.
/// Parses a .properties file from a line-based input and invokes a callback handler
/// for each record of the .properties file that is parsed.
///
/// Returns the position of the last logical line that was looked at.
///
/// # Errors
/// * if the line input errors.
/// * if a `\uXXXX` escape is malformed. Nothing after the offending line is parsed.
///
/// # Example
/// ```rust
/// use jproperties::{ParserPosition, Record};
///
/// let mut seen = Vec::new();
/// let mut handler = |pos: &ParserPosition, record: Record| {
///     seen.push((pos.line, record.key));
///     true
/// };
///
/// let mut lines = "#beepbop\nkey=value\n\nanother_key another_value".lines();
/// jproperties::parse(&mut lines, &mut handler).expect("Syntax error");
/// assert_eq!(seen, vec![(2, "key".to_string()), (4, "another_key".to_string())]);
/// ```
pub fn parse<T: LineInput<E>, E>(
    input: &mut T,
    handler: &mut impl PropertyHandler,
) -> Result<ParserPosition, ParserError<E>> {
    let mut pos = ParserPosition::default();

    for logical in LineAssembler::new(input) {
        let logical = logical?;
        pos = ParserPosition {
            line: logical.first_line,
            end_line: logical.last_line,
            logical_line: pos.logical_line + 1,
            character_in_line: 0,
        };

        if logical.content.is_empty() {
            continue;
        }

        let raw = split_key_value(&logical.content);
        let key = escape::decode(raw.key).map_err(|e| e.at::<E>(pos, 0))?;
        let value = escape::decode(raw.value).map_err(|e| e.at::<E>(pos, raw.value_offset))?;

        trace!(%pos, key = %key, "parsed record");
        if !handler.handle(&pos, Record { key, value }) {
            return Ok(pos);
        }
    }

    Ok(pos)
}

/// Parse the str as a properties file.
///
/// # Errors
/// * if a `\uXXXX` escape is malformed.
pub fn parse_str(
    str: impl AsRef<str>,
    handler: &mut impl PropertyHandler,
) -> Result<ParserPosition, ParserError<InfallibleIO>> {
    parse(&mut PhysicalLines::new(str.as_ref()), handler)
}

/// Parse the str as a properties file and return every record in source order.
/// A key that appears twice is returned twice.
///
/// # Errors
/// * if a `\uXXXX` escape is malformed.
pub fn parse_str_to_vec(
    str: impl AsRef<str>,
) -> Result<Vec<(String, String)>, ParserError<InfallibleIO>> {
    let mut result = VecHandler::default();
    parse_str(str, &mut result)?;
    Ok(result.0)
}

/// Read utf-8 text from a reader and parse it as a properties file.
///
/// # Errors
/// * if the reader errors or yields invalid utf-8.
/// * if a `\uXXXX` escape is malformed.
pub fn parse_reader(
    reader: impl io::BufRead,
    handler: &mut impl PropertyHandler,
) -> Result<ParserPosition, ParserError<io::Error>> {
    parse(&mut BufReadLines::new(reader), handler)
}
