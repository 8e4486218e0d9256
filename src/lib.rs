// SPDX-License-Identifier: MIT OR Apache-2.0

//! Look up a counterpart string or path from layered configuration files.
//!
//! A counterpart is the value configured for an input string: an explicit entry in the
//! `COUNTERPART_MAP` section, or, failing that, the input treated as a path and
//! rewritten under the `prepend_path` of the `COUNTERPART_DIR` section.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: The merged store, reserved sections, interpolation and errors
//! - **Ports**: Trait definitions for parsing, lookups and reporting
//! - **Adapters**: The INI file reader, input strings, stream reporter and CLI
//! - **Service**: The layered loader, the resolver and the batch driver
//!
//! # Configuration files
//!
//! `~/.counterc` is read first when present, then the explicit configuration file
//! (or `./.counterc` when none is given), then any additional files. Later files
//! override earlier ones. Files listed in `INCLUDE.paths` are read immediately after
//! the file that lists them, relative to its directory.
//!
//! ```text
//! [COUNTERPART_MAP]
//! counterparts.py = tests/test_counterparts.py
//!
//! [COUNTERPART_DIR]
//! prepend_path = %(home)s/lib
//!
//! [INCLUDE]
//! paths =
//!     more.conf
//!     /etc/counterparts/site.conf
//! ```
//!
//! # Feature Flags
//!
//! - `cli`: Enable the `counterpart` binary and the clap argument adapter (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use counterparts::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> counterparts::domain::Result<()> {
//! // Read the files once, then look up as many keys as needed
//! let mapping = get_counterpart_mapping(Some(Path::new("project.counterc")), false)?;
//! let counterpart = mapping.lookup("bashlib/lib")?;
//!
//! // Or in one step, re-reading the files every time
//! let counterpart = map_counterpart("bashlib/lib", Some(Path::new("project.counterc")))?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{ConfigError, ConfigStore, ElseAction, Result, SectionKind};
    pub use crate::ports::{ConfigParser, CounterpartLookup, Reporter};
    pub use crate::service::{
        get_counterpart_mapping, map_counterpart, resolve_all, BatchOptions, CounterpartMapping,
        LayeredLoader, LoaderOptions,
    };

    #[cfg(feature = "cli")]
    pub use crate::adapters::CliArgs;
    pub use crate::adapters::{InputStrings, StreamReporter};
}
