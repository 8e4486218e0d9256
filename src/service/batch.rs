// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batch resolution.
//!
//! Resolves a stream of input strings through a [`CounterpartLookup`], reports each
//! outcome and folds the outcomes into one return code.

use crate::domain::{ElseAction, Result, ReturnCode};
use crate::ports::{CounterpartLookup, Reporter};

/// How a batch treats inputs that have no counterpart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// What to emit for an unresolved input
    pub else_action: ElseAction,
    /// Return code recorded for an unresolved input; 0 means "not an error"
    pub else_errno: i32,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            else_action: ElseAction::default(),
            else_errno: 1,
        }
    }
}

/// Resolves every input in order.
///
/// Found counterparts record 0; unresolved inputs record `options.else_errno` whatever
/// the action. The first non-zero code is kept.
///
/// # Errors
///
/// Stops at the first input error, reporter error or lookup error other than
/// `NotFound`. With [`ElseAction::Exception`], an unresolved input stops the batch with
/// its `NotFound` error.
///
/// # Examples
///
/// ```rust
/// use counterparts::adapters::StreamReporter;
/// use counterparts::domain::{ConfigStore, ElseAction, SectionKind};
/// use counterparts::service::{resolve_all, BatchOptions, CounterpartMapping};
///
/// let mut store = ConfigStore::new();
/// store.set(&SectionKind::Mapping, "foo", Some("bar".to_string()));
/// let mapping = CounterpartMapping::new(store, "/");
///
/// let inputs = vec![Ok("foo".to_string()), Ok("nope".to_string())];
/// let mut reporter = StreamReporter::new(Vec::new(), Vec::new(), false);
/// let options = BatchOptions { else_action: ElseAction::Passthrough, else_errno: 4 };
///
/// let rc = resolve_all(&mapping, inputs, &mut reporter, &options).unwrap();
/// assert_eq!(rc.code(), 4);
/// assert_eq!(reporter.into_inner().0, b"bar\nnope\n");
/// ```
pub fn resolve_all<L, I, R>(
    lookup: &L,
    inputs: I,
    reporter: &mut R,
    options: &BatchOptions,
) -> Result<ReturnCode>
where
    L: CounterpartLookup + ?Sized,
    I: IntoIterator<Item = Result<String>>,
    R: Reporter + ?Sized,
{
    let mut rc = ReturnCode::default();

    for input in inputs {
        let input = input?;
        match lookup.lookup(&input) {
            Ok(counterpart) => {
                reporter.found(&input, &counterpart)?;
                rc.record(0);
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No counterpart for '{}' (action: {})", input, options.else_action);
                if options.else_action == ElseAction::Exception {
                    return Err(e);
                }
                reporter.not_found(&input, options.else_action)?;
                rc.record(options.else_errno);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(rc)
}
