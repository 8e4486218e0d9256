// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stream reporter adapter.
//!
//! Writes counterparts and failure notices to a pair of output streams, normally
//! standard output and standard error.

use crate::domain::{ElseAction, Result};
use crate::ports::Reporter;
use std::io::{self, Stderr, Stdout, Write};

/// A reporter writing to an output stream and an error stream.
///
/// Counterparts and passthrough echoes go to `out`; `error` notices go to `err`. Each
/// record ends in a newline unless `no_newline` is set.
///
/// # Examples
///
/// ```rust
/// use counterparts::adapters::StreamReporter;
/// use counterparts::domain::ElseAction;
/// use counterparts::ports::Reporter;
///
/// let mut reporter = StreamReporter::new(Vec::new(), Vec::new(), false);
/// reporter.found("foo", "bar").unwrap();
/// reporter.not_found("baz", ElseAction::Error).unwrap();
///
/// let (out, err) = reporter.into_inner();
/// assert_eq!(out, b"bar\n");
/// assert_eq!(err, b"# No counterpart found for: baz\n");
/// ```
#[derive(Debug)]
pub struct StreamReporter<O: Write, E: Write> {
    out: O,
    err: E,
    no_newline: bool,
}

impl StreamReporter<Stdout, Stderr> {
    /// Creates a reporter over the process's standard output and standard error.
    pub fn stdio(no_newline: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), no_newline)
    }
}

impl<O: Write, E: Write> StreamReporter<O, E> {
    /// Creates a reporter over the given streams.
    pub fn new(out: O, err: E, no_newline: bool) -> Self {
        Self {
            out,
            err,
            no_newline,
        }
    }

    /// Consumes the reporter, returning its streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn terminator(&self) -> &'static str {
        if self.no_newline {
            ""
        } else {
            "\n"
        }
    }
}

impl<O: Write, E: Write> Reporter for StreamReporter<O, E> {
    fn found(&mut self, _input: &str, counterpart: &str) -> Result<()> {
        let terminator = self.terminator();
        write!(self.out, "{}{}", counterpart, terminator)?;
        self.out.flush()?;
        Ok(())
    }

    fn not_found(&mut self, input: &str, action: ElseAction) -> Result<()> {
        let terminator = self.terminator();
        match action {
            ElseAction::Passthrough => {
                write!(self.out, "{}{}", input, terminator)?;
                self.out.flush()?;
            }
            ElseAction::Error => {
                write!(self.err, "# No counterpart found for: {}{}", input, terminator)?;
                self.err.flush()?;
            }
            ElseAction::Silent | ElseAction::Exception => {}
        }
        Ok(())
    }
}
