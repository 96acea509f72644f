//! Backslash escape grammar shared by keys and values.
//!
//! Decoding knows `\f \n \r \t`, `\uXXXX` (with utf-16 surrogate pairs) and drops the backslash
//! in front of any other character. Encoding is minimal: only what would be misread on the next parse is escaped.

use crate::error::EscapeError;
use crate::writer::CharacterOutput;
use crate::{is_whitespace, InfallibleIO};

/// Decode the escape sequence that follows a backslash.
///
/// `rest` is the raw text right after the backslash.
/// Returns the decoded character and the number of characters of `rest` it consumed,
/// or `None` for a backslash at the very end of the input, which is ignored.
///
/// # Errors
/// if `rest` starts with a `u` that is not followed by four hex digits, or the escape
/// encodes a utf-16 surrogate that is not part of a valid pair.
/// The error offset is 0, the position of the backslash.
pub fn unescape_char(rest: &str) -> Result<Option<(char, usize)>, EscapeError> {
    let Some(first) = rest.chars().next() else {
        return Ok(None);
    };

    let decoded = match first {
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return unescape_unicode(rest).map(Some),
        other => other,
    };

    Ok(Some((decoded, 1)))
}

/// Parses exactly 4 hex digits at the start of `s`.
fn hex4(s: &str) -> Option<u16> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    u16::from_str_radix(digits, 16).ok()
}

/// `rest` starts at the `u` of a `\uXXXX` escape.
fn unescape_unicode(rest: &str) -> Result<(char, usize), EscapeError> {
    let malformed = |len: usize| EscapeError {
        offset: 0,
        sequence: core::iter::once('\\').chain(rest.chars().take(len)).collect(),
    };

    let unit = hex4(&rest[1..]).ok_or_else(|| malformed(5))?;

    match unit {
        0xD800..=0xDBFF => {
            let low = rest
                .get(5..)
                .and_then(|s| s.strip_prefix("\\u"))
                .and_then(hex4)
                .filter(|low| (0xDC00..=0xDFFF).contains(low))
                .ok_or_else(|| malformed(11))?;

            match char::decode_utf16([unit, low].iter().copied()).next() {
                Some(Ok(c)) => Ok((c, 11)),
                _ => Err(malformed(11)),
            }
        }
        0xDC00..=0xDFFF => Err(malformed(5)),
        _ => char::from_u32(u32::from(unit))
            .map(|c| (c, 5))
            .ok_or_else(|| malformed(5)),
    }
}

/// Decode all escapes in a raw key or value fragment.
///
/// # Errors
/// on a malformed `\uXXXX` escape, with the character offset of its backslash inside `raw`.
pub fn decode(raw: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut offset = 0usize;

    while let Some(idx) = rest.find('\\') {
        let literal = &rest[..idx];
        out.push_str(literal);
        offset += literal.chars().count();

        let after = &rest[idx + 1..];
        let Some((c, consumed)) =
            unescape_char(after).map_err(|e| EscapeError { offset, ..e })?
        else {
            rest = after;
            break;
        };

        out.push(c);
        let consumed_bytes = after
            .char_indices()
            .nth(consumed)
            .map_or(after.len(), |(i, _)| i);
        rest = &after[consumed_bytes..];
        offset += 1 + consumed;
    }

    out.push_str(rest);
    Ok(out)
}

/// Emits the 6-character sequence (\uXXXX, XXXX being HEX) needed to escape a single char.
/// For characters that need 2 utf-16 escape sequences (surrogates), it emits 12 characters.
fn escape_unicode<E>(target: &mut impl CharacterOutput<E>, c: char) -> Result<(), E> {
    /// Upper case hex digits.
    static LUT: [char; 16] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
    ];

    let mut buf = [0; 2];
    for unit in c.encode_utf16(&mut buf).iter().copied() {
        target.write('\\')?;
        target.write('u')?;
        target.write(LUT[((unit >> 12) & 0xF) as usize])?;
        target.write(LUT[((unit >> 8) & 0xF) as usize])?;
        target.write(LUT[((unit >> 4) & 0xF) as usize])?;
        target.write(LUT[(unit & 0xF) as usize])?;
    }

    Ok(())
}

/// Writes `\` followed by `c`.
fn escaped<E>(target: &mut impl CharacterOutput<E>, c: char) -> Result<(), E> {
    target.write('\\')?;
    target.write(c)
}

/// Escaping rules keys and values have in common: the four control escapes,
/// unicode escapes for other control chars and for anything the output can't represent.
fn escape_common<E>(target: &mut impl CharacterOutput<E>, c: char) -> Result<(), E> {
    match c {
        '\\' => escaped(target, '\\'),
        '\x0C' => escaped(target, 'f'),
        '\n' => escaped(target, 'n'),
        '\r' => escaped(target, 'r'),
        '\t' => escaped(target, 't'),
        //We don't trust dodgy parsers to parse ascii control chars even if they are supported by the encoding.
        other if other.is_ascii_control() || !target.can_write(other) => {
            escape_unicode(target, other)
        }
        other => target.write(other),
    }
}

/// Write a key so that it is read back as exactly this key.
///
/// Space, `=` and `:` are escaped everywhere since any of them ends an unescaped key.
/// A leading `#` or `!` is escaped so the line is not taken for a comment.
///
/// # Errors
/// Propagated from the `CharacterOutput`
pub fn escape_key<E>(target: &mut impl CharacterOutput<E>, key: &str) -> Result<(), E> {
    for (i, c) in key.chars().enumerate() {
        match c {
            '#' | '!' if i == 0 => escaped(target, c)?,
            ' ' | '=' | ':' => escaped(target, c)?,
            other => escape_common(target, other)?,
        }
    }

    Ok(())
}

/// Write a value so that it is read back as exactly this value.
///
/// Only leading spaces need escaping, the parser keeps everything after the first non-whitespace.
///
/// # Errors
/// Propagated from the `CharacterOutput`
pub fn escape_value<E>(target: &mut impl CharacterOutput<E>, value: &str) -> Result<(), E> {
    let mut leading = true;
    for c in value.chars() {
        if c == ' ' && leading {
            escaped(target, ' ')?;
        } else {
            escape_common(target, c)?;
        }

        leading = leading && is_whitespace(c);
    }

    Ok(())
}

/// [`escape_key`] into a new String.
#[must_use]
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let result: Result<(), InfallibleIO> = escape_key(&mut out, key);
    debug_assert!(result.is_ok());
    out
}

/// [`escape_value`] into a new String.
#[must_use]
pub fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let result: Result<(), InfallibleIO> = escape_value(&mut out, value);
    debug_assert!(result.is_ok());
    out
}
