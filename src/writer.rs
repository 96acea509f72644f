//! Serialization of records into `.properties` text.
//!
//! Every record becomes one `key = value` line, regardless of the separator it was read with.
//! Comments and blank lines are never written.

use core::fmt;
use std::io;

use crate::escape::{escape_key, escape_value};
use crate::parser::Record;
use crate::InfallibleIO;

/// The separator written between every key and value.
pub const SEPARATOR: &str = " = ";

/// Line ending used by `Properties::save` and the `Display` impl.
pub const LINE_ENDING: &str = "\n";

pub trait CharacterOutput<E> {
    /// Write a single character to the character output
    ///
    /// # Errors
    /// IO Errors
    fn write(&mut self, data: char) -> Result<(), E>;

    /// Determines if a character needs to be Unicode escaped.
    /// This function will NOT be called for characters that always get a backslash escape
    /// (`\`, `=`, `:`, space in keys, the control characters) or for the `line_ending`.
    fn can_write(&mut self, data: char) -> bool;
}

impl CharacterOutput<InfallibleIO> for String {
    fn write(&mut self, data: char) -> Result<(), InfallibleIO> {
        self.push(data);
        Ok(())
    }

    fn can_write(&mut self, _: char) -> bool {
        true
    }
}

impl CharacterOutput<InfallibleIO> for &mut Vec<char> {
    fn write(&mut self, data: char) -> Result<(), InfallibleIO> {
        self.push(data);
        Ok(())
    }

    fn can_write(&mut self, _: char) -> bool {
        true
    }
}

impl CharacterOutput<fmt::Error> for fmt::Formatter<'_> {
    fn write(&mut self, data: char) -> fmt::Result {
        fmt::Write::write_char(self, data)
    }

    fn can_write(&mut self, _: char) -> bool {
        true
    }
}

/// UTF-8 character output
struct UTF8Out<'a, T: io::Write>(&'a mut T);

impl<T: io::Write> CharacterOutput<io::Error> for UTF8Out<'_, T> {
    fn write(&mut self, data: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.0.write_all(data.encode_utf8(&mut buf).as_bytes())
    }

    fn can_write(&mut self, _: char) -> bool {
        true
    }
}

/// US Ascii character output
struct ASCIIOut<'a, T: io::Write>(&'a mut T);

impl<T: io::Write> CharacterOutput<io::Error> for ASCIIOut<'_, T> {
    fn write(&mut self, data: char) -> io::Result<()> {
        if self.can_write(data) {
            return self.0.write_all(&[data as u8]);
        }

        self.0.write_all(b"?")
    }

    fn can_write(&mut self, data: char) -> bool {
        data == '\r' || data == '\n' || (' '..'\x7F').contains(&data)
    }
}

/// Writes every char of `s` unescaped.
fn write_raw<E>(target: &mut impl CharacterOutput<E>, s: &str) -> Result<(), E> {
    for c in s.chars() {
        target.write(c)?;
    }

    Ok(())
}

/// Serialize a set of records into a .properties file into some sort of character-based output.
/// The escaping/charset depends on the implementation of the `CharacterOutput`.
///
/// Every record is written as `key = value` followed by `line_ending`, so the last line is terminated too.
///
/// Provided implementations for `CharacterOutput`:
/// * String - will use utf-8
/// * &mut Vec<char> - has no encoding. (Unicode)
/// * `fmt::Formatter` - used by the `Display` impl of `Properties`
///
/// Types typically used as the `source`:
/// * `&Properties`
/// * `Vec<(String, String)>` (or its reference/slice)
/// * `Vec<Record>` (or its reference/slice)
///
/// # Errors
/// Propagated from the `CharacterOutput`
///
/// # Example
/// ```rust
/// let props = vec![("some_key", "some value"), ("another:key", " padded")];
///
/// let mut output = String::new();
/// _ = jproperties::write(&props, &mut output, "\n");
///
/// assert_eq!("some_key = some value\nanother\\:key = \\ padded\n", &output);
/// ```
pub fn write<E, I: Into<Record>>(
    source: impl IntoIterator<Item = I>,
    target: &mut impl CharacterOutput<E>,
    line_ending: &str,
) -> Result<(), E> {
    for record in source {
        let Record { key, value } = record.into();
        escape_key(target, &key)?;
        write_raw(target, SEPARATOR)?;
        escape_value(target, &value)?;
        write_raw(target, line_ending)?;
    }

    Ok(())
}

/// Serialize a set of records into a .properties file into a byte-based output.
///
/// This method will write utf-8 bytes into the output and only escape ascii control characters, as well as
/// characters that must be escaped for encoding the .properties file.
/// All other Unicode characters are simply utf-8 encoded as is.
///
/// # Errors
/// Propagated from the writer
pub fn write_utf8<I: Into<Record>>(
    source: impl IntoIterator<Item = I>,
    target: &mut impl io::Write,
    line_ending: &str,
) -> io::Result<()> {
    let mut utf = UTF8Out(target);
    write(source, &mut utf, line_ending)
}

/// Serialize a set of records into a .properties file into a byte-based output.
///
/// This method will write US-ASCII bytes into the output and escape all ascii control characters
/// as well as all other non-ascii Unicode code points as `\uXXXX`.
/// Characters outside the basic multilingual plane are written as two escaped utf-16 surrogates.
///
/// # Errors
/// Propagated from the writer
pub fn write_ascii<I: Into<Record>>(
    source: impl IntoIterator<Item = I>,
    target: &mut impl io::Write,
    line_ending: &str,
) -> io::Result<()> {
    let mut ascii = ASCIIOut(target);
    write(source, &mut ascii, line_ending)
}
