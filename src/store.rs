//! The ordered, key-unique property store.

use core::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{KeyNotFound, ParserError};
use crate::lines::{BufReadLines, LineInput, PhysicalLines};
use crate::parser::{parse, PropertyHandler, Record};
use crate::writer::{write, write_utf8, LINE_ENDING};
use crate::{InfallibleIO, ParserPosition};

/// Key/value pairs of a `.properties` file in insertion order.
///
/// Setting a key that already exists updates its value in place, the key keeps its position.
/// This is also what happens when a file declares the same key twice: the last value wins,
/// the first position is kept.
///
/// Two stores are equal if they hold the same pairs, in whatever order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// Entries in insertion order.
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from physical lines.
    ///
    /// # Errors
    /// * if the line input errors.
    /// * if a `\uXXXX` escape is malformed. No partially filled store is returned.
    pub fn load<T: LineInput<E>, E>(input: &mut T) -> Result<Self, ParserError<E>> {
        let mut props = Self::new();
        let pos = parse(input, &mut props)?;
        debug!(
            keys = props.len(),
            lines = pos.end_line,
            "loaded properties"
        );
        Ok(props)
    }

    /// Parse a store from text.
    ///
    /// # Errors
    /// * if a `\uXXXX` escape is malformed.
    pub fn load_str(text: impl AsRef<str>) -> Result<Self, ParserError<InfallibleIO>> {
        Self::load(&mut PhysicalLines::new(text.as_ref()))
    }

    /// Parse a store from an open reader that yields utf-8 text.
    ///
    /// # Errors
    /// * if the reader errors or yields invalid utf-8.
    /// * if a `\uXXXX` escape is malformed.
    pub fn load_reader(reader: impl io::BufRead) -> Result<Self, ParserError<io::Error>> {
        Self::load(&mut BufReadLines::new(reader))
    }

    /// Open the file at `path`, parse it and close it again.
    ///
    /// # Errors
    /// * if the file can't be opened (reported at the default position) or read.
    /// * if a `\uXXXX` escape is malformed.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ParserError<io::Error>> {
        let file = File::open(path.as_ref())
            .map_err(|e| ParserError::InputError(ParserPosition::default(), e))?;
        Self::load_reader(BufReader::new(file))
    }

    /// Write all entries as utf-8 `key = value` lines, each terminated by `\n`.
    ///
    /// # Errors
    /// Propagated from the writer
    pub fn save(&self, target: &mut impl Write) -> io::Result<()> {
        write_utf8(self, target, LINE_ENDING)?;
        debug!(keys = self.len(), "saved properties");
        Ok(())
    }

    /// Create or truncate the file at `path` and [`save`](Self::save) into it.
    ///
    /// # Errors
    /// if the file can't be created or written.
    pub fn save_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        self.save(&mut out)?;
        out.flush()
    }

    /// Value of `key`.
    ///
    /// # Errors
    /// if the key is not present.
    pub fn get(&self, key: &str) -> Result<&str, KeyNotFound> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| KeyNotFound(key.to_string()))
    }

    /// Value of `key`, or `default` if it is not present.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.entries.get(key).map_or(default, String::as_str)
    }

    /// Insert or update. An existing key keeps its position.
    /// Returns the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, keeping the order of the remaining keys.
    ///
    /// # Errors
    /// if the key is not present.
    pub fn remove(&mut self, key: &str) -> Result<String, KeyNotFound> {
        self.entries
            .shift_remove(key)
            .ok_or_else(|| KeyNotFound(key.to_string()))
    }

    /// [`set`](Self::set) every pair of `other`, in its iteration order.
    pub fn update<K: Into<String>, V: Into<String>>(
        &mut self,
        other: impl IntoIterator<Item = (K, V)>,
    ) {
        for (key, value) in other {
            self.set(key, value);
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of unique keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys in store order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values in store order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl PropertyHandler for Properties {
    fn handle(&mut self, position: &ParserPosition, record: Record) -> bool {
        if self.set(record.key, record.value).is_some() {
            debug!(%position, "duplicate key, keeping the last value");
        }
        true
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        props.update(iter);
        props
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Properties {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The text [`Properties::save`] writes.
impl Display for Properties {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write(self, f, LINE_ENDING)
    }
}
