//! Error types for parsing and for key lookups.

use thiserror::Error;

use crate::ParserPosition;

/// Error of a parse operation.
///
/// `E` is the error type of the line source, [`crate::InfallibleIO`] for memory and
/// [`std::io::Error`] for readers and files.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum ParserError<E> {
    /// a \uXXXX escape sequence was not followed by exactly four hexadecimal digits,
    /// or it encoded a utf-16 surrogate that was not part of a valid pair.
    #[error("MalformedUnicodeEscape({position}, {sequence:?})")]
    MalformedUnicodeEscape {
        /// Logical line and character offset of the backslash that started the escape.
        position: ParserPosition,
        /// The offending raw text, starting at the backslash.
        sequence: String,
    },

    /// Input io error E occurred while reading the physical line after `ParserPosition`.
    #[error("InputError({0}, {1})")]
    InputError(ParserPosition, E),
}

impl<E> ParserError<E> {
    /// Position of the error in the source.
    #[must_use]
    pub const fn position(&self) -> &ParserPosition {
        match self {
            Self::MalformedUnicodeEscape { position, .. } | Self::InputError(position, _) => {
                position
            }
        }
    }
}

/// Error of the escape decoder. Only knows about the fragment it was given.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
#[error("malformed unicode escape {sequence:?} at char {offset}")]
pub struct EscapeError {
    /// Character offset of the backslash inside the decoded fragment.
    pub offset: usize,
    /// The offending raw text, starting at the backslash.
    pub sequence: String,
}

impl EscapeError {
    /// Lift into a [`ParserError`], `base` being the char offset of the fragment in its logical line.
    #[must_use]
    pub fn at<E>(self, position: ParserPosition, base: usize) -> ParserError<E> {
        ParserError::MalformedUnicodeEscape {
            position: position.at_char((base + self.offset) as u64),
            sequence: self.sequence,
        }
    }
}

/// Lookup or removal of a key that is not present.
#[derive(Debug, Error, Eq, PartialEq, Clone)]
#[error("key not found: {0:?}")]
pub struct KeyNotFound(pub String);
