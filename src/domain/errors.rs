// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the counterparts crate.
//!
//! This module defines the error types that can occur when loading configuration files
//! and resolving counterparts. All errors use `thiserror` for proper error handling and
//! conversion.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loading and lookup operations.
///
/// Every variant except [`ConfigError::NotFound`] is fatal to the load that raised it:
/// no partially merged store is ever returned. `NotFound` is the one recoverable
/// condition and is raised only by lookups. It is marked as `#[non_exhaustive]` to allow
/// for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use counterparts::domain::errors::ConfigError;
///
/// fn find_counterpart() -> Result<String, ConfigError> {
///     Err(ConfigError::NotFound {
///         key: "bashlib".to_string(),
///     })
/// }
///
/// assert!(find_counterpart().unwrap_err().is_not_found());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No counterpart exists for the requested key.
    #[error("Mapping not found in COUNTERPART_MAP: {key}")]
    NotFound {
        /// The key that was looked up
        key: String,
    },

    /// A required configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound {
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// An include directive named a file that was already processed in this session.
    #[error("In {}: {} already read", included_from.display(), path.display())]
    RecursionInConfigFile {
        /// The file that was included a second time
        path: PathBuf,
        /// The file whose include directive re-declared it
        included_from: PathBuf,
    },

    /// The home directory could not be determined.
    #[error("Failed to determine the home directory: HOME is unset and no platform default exists")]
    HomeDirNotFound,

    /// A configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An option line appeared before any section header.
    #[error("File contains no section headers: {}, line {line}: {content:?}", path.display())]
    MissingSectionHeader {
        /// The file being parsed
        path: PathBuf,
        /// One-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// A section header appeared twice in the same file.
    #[error("While reading from {} [line {line}]: section {section:?} already exists", path.display())]
    DuplicateSection {
        /// The file being parsed
        path: PathBuf,
        /// One-based line number of the repeated header
        line: usize,
        /// The repeated section name
        section: String,
    },

    /// An option appeared twice in the same section of the same file.
    #[error(
        "While reading from {} [line {line}]: option {option:?} in section {section:?} already exists",
        path.display()
    )]
    DuplicateOption {
        /// The file being parsed
        path: PathBuf,
        /// One-based line number of the repeated option
        line: usize,
        /// The section holding the option
        section: String,
        /// The repeated option name
        option: String,
    },

    /// A `%(name)s` reference named an option that does not exist.
    #[error("Bad value substitution: option {option:?} in section {section:?} references missing option {reference:?}")]
    InterpolationMissingOption {
        /// The section being read
        section: String,
        /// The option whose value holds the reference
        option: String,
        /// The name that could not be resolved
        reference: String,
    },

    /// A value contained a `%` that is not part of a valid reference.
    #[error("Bad interpolation syntax in option {option:?} of section {section:?}: {message}")]
    InterpolationSyntax {
        /// The section being read
        section: String,
        /// The option whose value is malformed
        option: String,
        /// What was wrong with the value
        message: String,
    },

    /// References nested deeper than the interpolation limit.
    #[error("Recursion limit exceeded in value substitution: option {option:?} in section {section:?}")]
    InterpolationDepth {
        /// The section being read
        section: String,
        /// The option whose expansion was too deep
        option: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns `true` if this is the recoverable "no counterpart" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}

/// A specialized Result type for counterpart operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
