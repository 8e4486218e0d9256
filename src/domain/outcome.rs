// SPDX-License-Identifier: MIT OR Apache-2.0

//! What to do when a lookup has no answer, and how results add up to an exit code.

use std::fmt;

/// The behavior applied to an input string that has no counterpart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ElseAction {
    /// Echo the original string to the output stream.
    Passthrough,
    /// Emit nothing.
    Silent,
    /// Emit `# No counterpart found for: <string>` to the error stream.
    Error,
    /// Abort the batch with an error.
    #[default]
    Exception,
}

impl ElseAction {
    /// Returns the action's name as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElseAction::Passthrough => "passthrough",
            ElseAction::Silent => "silent",
            ElseAction::Error => "error",
            ElseAction::Exception => "exception",
        }
    }
}

impl fmt::Display for ElseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The return code of a batch of lookups.
///
/// The first non-zero code recorded sticks: later successes and later failures with a
/// different code leave it alone.
///
/// # Examples
///
/// ```
/// use counterparts::domain::outcome::ReturnCode;
///
/// let mut rc = ReturnCode::default();
/// rc.record(0);
/// rc.record(3);
/// rc.record(0);
/// rc.record(1);
/// assert_eq!(rc.code(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReturnCode(i32);

impl ReturnCode {
    /// Folds one result's code into the running total.
    pub fn record(&mut self, code: i32) {
        if self.0 == 0 {
            self.0 = code;
        }
    }

    /// Returns the accumulated code.
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Returns `true` while nothing has failed.
    pub fn is_success(&self) -> bool {
        self.0 == 0
    }
}
