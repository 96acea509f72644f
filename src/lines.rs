//! Physical line input and assembly of logical lines.
//!
//! A logical line is one or more physical lines joined by continuation: a physical line ending in
//! an odd number of backslashes continues on the next one, whose leading whitespace is dropped.
//! Comment lines (`#` or `!` as first non-whitespace) never take part in a logical line.

use std::collections::VecDeque;
use std::io;
use std::marker::PhantomData;

use tracing::trace;

use crate::error::ParserError;
use crate::{is_whitespace, InfallibleIO, ParserPosition};

pub trait LineInput<E> {
    /// Read the next physical line from some input source.
    /// The line may still carry its terminator.
    ///
    /// # Return values
    /// 1. Ok(None) to signal EOF.
    /// 2. Ok(Some) to give the next line to the parser.
    /// 3. Err is passed as is to the caller.
    /// # Errors
    /// Presumably IO Errors
    fn next_line(&mut self) -> Result<Option<String>, E>;
}

impl<T: Iterator<Item = S>, S: Into<String>> LineInput<InfallibleIO> for T {
    fn next_line(&mut self) -> Result<Option<String>, InfallibleIO> {
        Ok(self.next().map(Into::into))
    }
}

/// Splits text into physical lines, keeping each line's terminator.
/// `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a>(&'a str);

impl<'a> PhysicalLines<'a> {
    /// Physical lines of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self(text)
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.0.is_empty() {
            return None;
        }

        let end = match self.0.find(|c: char| c == '\n' || c == '\r') {
            None => self.0.len(),
            Some(i) if self.0[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
        };

        let (line, rest) = self.0.split_at(end);
        self.0 = rest;
        Some(line)
    }
}

/// Physical lines of a buffered reader.
///
/// The reader must produce utf-8, invalid data is reported as the reader's io error.
#[derive(Debug)]
pub struct BufReadLines<R> {
    /// The source.
    reader: R,
    /// Lines split off a chunk that contained lone `\r` terminators.
    pending: VecDeque<String>,
}

impl<R: io::BufRead> BufReadLines<R> {
    /// Read physical lines from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: io::BufRead> LineInput<io::Error> for BufReadLines<R> {
    fn next_line(&mut self) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }

        let mut chunk = String::new();
        if self.reader.read_line(&mut chunk)? == 0 {
            return Ok(None);
        }

        if !chunk.contains('\r') {
            return Ok(Some(chunk));
        }

        self.pending
            .extend(PhysicalLines::new(&chunk).map(String::from));
        Ok(self.pending.pop_front())
    }
}

/// A record's raw text, possibly assembled from several physical lines. Escapes are not decoded yet.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct LogicalLine {
    /// Joined content, leading whitespace and continuation backslashes removed.
    pub content: String,
    /// Physical line the logical line started on, starting at 1.
    pub first_line: u64,
    /// Physical line the logical line ended on.
    pub last_line: u64,
}

/// Strip a single trailing line terminator.
fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// True if the line ends in an odd number of backslashes.
fn is_continued(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Forward-only producer of logical lines from a `LineInput`.
///
/// Blank lines are produced as logical lines with empty content, comments are skipped.
/// Input ending in the middle of a continuation completes the partial logical line.
/// After the first error the assembler is exhausted.
pub struct LineAssembler<'a, T: LineInput<E>, E> {
    /// The physical lines.
    input: &'a mut T,
    /// Number of physical lines read so far.
    line: u64,
    /// Set after EOF or an input error.
    done: bool,
    /// The input error type.
    _error: PhantomData<E>,
}

impl<'a, T: LineInput<E>, E> LineAssembler<'a, T, E> {
    /// Assemble logical lines from `input`.
    pub fn new(input: &'a mut T) -> Self {
        Self {
            input,
            line: 0,
            done: false,
            _error: PhantomData,
        }
    }

    /// Next physical line, counting it.
    fn read(&mut self) -> Result<Option<String>, ParserError<E>> {
        match self.input.next_line() {
            Ok(Some(line)) => {
                self.line += 1;
                Ok(Some(line))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                let position = ParserPosition {
                    line: self.line + 1,
                    end_line: self.line + 1,
                    ..ParserPosition::default()
                };
                Err(ParserError::InputError(position, e))
            }
        }
    }

    /// Reads until a logical line is complete.
    fn assemble(&mut self) -> Result<Option<LogicalLine>, ParserError<E>> {
        loop {
            let Some(raw) = self.read()? else {
                return Ok(None);
            };

            let first_line = self.line;
            let line = strip_terminator(&raw).trim_start_matches(is_whitespace);
            if line.starts_with(|c: char| c == '#' || c == '!') {
                trace!(line = first_line, "skipping comment");
                continue;
            }

            let mut continued = is_continued(line);
            let mut content = String::from(line);
            while continued {
                content.pop();
                let Some(next) = self.read()? else {
                    break;
                };

                let fragment = strip_terminator(&next).trim_start_matches(is_whitespace);
                trace!(line = self.line, first_line, "joining continuation line");
                continued = is_continued(fragment);
                content.push_str(fragment);
            }

            return Ok(Some(LogicalLine {
                content,
                first_line,
                last_line: self.line,
            }));
        }
    }
}

impl<T: LineInput<E>, E> Iterator for LineAssembler<'_, T, E> {
    type Item = Result<LogicalLine, ParserError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.assemble();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }

        result.transpose()
    }
}
