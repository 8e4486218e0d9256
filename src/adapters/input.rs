// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input string adapter.
//!
//! This module enumerates the strings to resolve: first every line of an input file (or
//! standard input), then any literal values given on the command line.

use crate::domain::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Input path that stands for standard input.
pub const STDIN_SENTINEL: &str = "-";

/// A sequential stream of input strings.
///
/// Lines are yielded without their line terminator. A read error is yielded once and
/// ends the line part of the stream; the literals still follow.
///
/// # Examples
///
/// ```rust
/// use counterparts::adapters::InputStrings;
/// use std::io::Cursor;
///
/// let input = InputStrings::from_reader(Cursor::new("a\nb\n"), vec!["c".to_string()]);
/// let strings: Vec<String> = input.map(|s| s.unwrap()).collect();
/// assert_eq!(strings, vec!["a", "b", "c"]);
/// ```
pub struct InputStrings {
    reader: Option<Box<dyn BufRead>>,
    literals: std::vec::IntoIter<String>,
}

impl InputStrings {
    /// Creates an input stream from an optional input path and literal strings.
    ///
    /// `path` may be [`STDIN_SENTINEL`] to read standard input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the input file cannot be opened.
    pub fn new(path: Option<&Path>, literals: Vec<String>) -> Result<Self> {
        let reader: Option<Box<dyn BufRead>> = match path {
            None => None,
            Some(p) if p.as_os_str() == STDIN_SENTINEL => {
                tracing::debug!("Reading input strings from standard input");
                Some(Box::new(BufReader::new(io::stdin())))
            }
            Some(p) => {
                tracing::debug!("Reading input strings from {}", p.display());
                Some(Box::new(BufReader::new(File::open(p)?)))
            }
        };
        Ok(Self {
            reader,
            literals: literals.into_iter(),
        })
    }

    /// Creates an input stream reading lines from `reader` before the literals.
    pub fn from_reader<R: BufRead + 'static>(reader: R, literals: Vec<String>) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            literals: literals.into_iter(),
        }
    }

    /// Creates an input stream of literal strings only.
    pub fn from_literals(literals: Vec<String>) -> Self {
        Self {
            reader: None,
            literals: literals.into_iter(),
        }
    }

    fn next_line(&mut self) -> Option<Result<String>> {
        let reader = self.reader.as_mut()?;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                self.reader = None;
                None
            }
            Ok(_) => {
                let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed_len);
                Some(Ok(line))
            }
            Err(e) => {
                self.reader = None;
                Some(Err(e.into()))
            }
        }
    }
}

impl Iterator for InputStrings {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.next_line() {
            return Some(line);
        }
        self.literals.next().map(Ok)
    }
}
