//! # jproperties
//! Parser and writer for java `.properties` files that keeps the order of keys.
//!
//! The read path is `LineAssembler` -> `split_key_value` -> `escape::decode`,
//! driven by [`parse`]. The write path is [`Properties`] -> [`write`] -> `escape::escape_key`/`escape_value`.
//!
//! ```rust
//! use jproperties::Properties;
//!
//! let mut props = Properties::load_str("fruits = apple, \\\n    banana\ncheeses").unwrap();
//! assert_eq!(props.get("fruits").unwrap(), "apple, banana");
//! assert_eq!(props.get("cheeses").unwrap(), "");
//!
//! props.set("cheeses", "gouda");
//! assert_eq!(props.to_string(), "fruits = apple, banana\ncheeses = gouda\n");
//! ```
#![deny(
    clippy::correctness,
    clippy::perf,
    clippy::complexity,
    clippy::style,
    clippy::nursery,
    clippy::pedantic,
    clippy::clone_on_ref_ptr,
    clippy::decimal_literal_representation,
    clippy::float_cmp_const,
    clippy::missing_docs_in_private_items,
    clippy::multiple_inherent_impl,
    clippy::unwrap_used,
    clippy::cargo_common_metadata,
    clippy::used_underscore_binding
)]

use core::fmt::{Display, Formatter};

pub mod error;
pub mod escape;
pub mod lines;
pub mod parser;
pub mod separator;
pub mod store;
pub mod writer;

pub use error::{EscapeError, KeyNotFound, ParserError};
pub use lines::{BufReadLines, LineAssembler, LineInput, LogicalLine, PhysicalLines};
pub use parser::{
    parse, parse_reader, parse_str, parse_str_to_vec, PropertyHandler, Record,
};
pub use separator::{split_key_value, RawRecord};
pub use store::Properties;
pub use writer::{write, write_ascii, write_utf8, CharacterOutput};

/// Name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Marker struct for I/O which cannot fail.
/// Any Result or Enum variant that contains this type is unreachable.
///
/// It is, for example, used if the source or output is memory,
/// because reading/writing from/to memory cannot fail without panicking or crashing.
#[derive(Debug, Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub struct InfallibleIO;

impl Display for InfallibleIO {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("InfallibleIO")
    }
}

impl std::error::Error for InfallibleIO {}

/// Where in the source a logical line (or something inside of it) was found.
#[derive(Debug, Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub struct ParserPosition {
    /// First physical line of the logical line, starting at 1.
    pub line: u64,
    /// Last physical line of the logical line. Differs from `line` only for continued lines.
    pub end_line: u64,
    /// Index of the logical line among all non-comment logical lines, starting at 1.
    pub logical_line: u64,
    /// Character offset inside the assembled logical line.
    pub character_in_line: u64,
}

impl Display for ParserPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "line: {} pos: {}",
            self.line, self.character_in_line
        ))
    }
}

impl ParserPosition {
    /// Same position, pointing at `offset` inside the logical line.
    #[must_use]
    pub const fn at_char(self, offset: u64) -> Self {
        Self {
            character_in_line: offset,
            ..self
        }
    }
}

/// Java's notion of whitespace in `.properties` files: space, tab and form feed.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C')
}
