// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result reporting trait definition.
//!
//! This module defines the `Reporter` trait, through which the batch driver emits the
//! outcome of each lookup.

use crate::domain::{ElseAction, Result};

/// A trait for emitting lookup outcomes.
///
/// [`ElseAction::Exception`] never reaches a reporter: the batch driver aborts before
/// reporting it.
///
/// # Examples
///
/// ```rust
/// use counterparts::ports::Reporter;
/// use counterparts::domain::{ElseAction, Result};
///
/// #[derive(Default)]
/// struct Collect(Vec<String>);
///
/// impl Reporter for Collect {
///     fn found(&mut self, _input: &str, counterpart: &str) -> Result<()> {
///         self.0.push(counterpart.to_string());
///         Ok(())
///     }
///
///     fn not_found(&mut self, input: &str, _action: ElseAction) -> Result<()> {
///         self.0.push(format!("? {}", input));
///         Ok(())
///     }
/// }
///
/// let mut collect = Collect::default();
/// collect.found("foo", "bar").unwrap();
/// assert_eq!(collect.0, vec!["bar"]);
/// ```
pub trait Reporter {
    /// Emits a resolved counterpart.
    fn found(&mut self, input: &str, counterpart: &str) -> Result<()>;

    /// Emits the failure notice chosen by `action` for an unresolved input.
    fn not_found(&mut self, input: &str, action: ElseAction) -> Result<()>;
}
