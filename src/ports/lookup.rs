// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counterpart lookup trait definition.
//!
//! This module defines the `CounterpartLookup` trait, the read-only view the batch
//! driver resolves input strings through.

use crate::domain::Result;

/// A trait for answering "what is the counterpart of X?".
///
/// Implementations return [`ConfigError::NotFound`](crate::domain::ConfigError::NotFound)
/// when they have no answer. Any other error is not recoverable by the caller.
///
/// # Examples
///
/// ```rust
/// use counterparts::ports::CounterpartLookup;
/// use counterparts::domain::{ConfigError, Result};
///
/// struct Upper;
///
/// impl CounterpartLookup for Upper {
///     fn lookup(&self, key: &str) -> Result<String> {
///         if key.is_empty() {
///             return Err(ConfigError::NotFound { key: key.to_string() });
///         }
///         Ok(key.to_uppercase())
///     }
/// }
///
/// assert_eq!(Upper.lookup("abc").unwrap(), "ABC");
/// assert!(Upper.lookup("").unwrap_err().is_not_found());
/// ```
pub trait CounterpartLookup {
    /// Returns the counterpart of `key`.
    fn lookup(&self, key: &str) -> Result<String>;
}

impl<T: CounterpartLookup + ?Sized> CounterpartLookup for &T {
    fn lookup(&self, key: &str) -> Result<String> {
        (**self).lookup(key)
    }
}
