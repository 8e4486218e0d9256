// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the configuration store, the reserved section names, value
//! interpolation and the lexical path rules shared by the loader and the resolver.
//! It does no I/O.

pub mod errors;
pub mod interpolation;
pub mod outcome;
pub mod paths;
pub mod section;
pub mod store;

// Re-export commonly used types
pub use errors::{ConfigError, Result};
pub use outcome::{ElseAction, ReturnCode};
pub use section::SectionKind;
pub use store::{ConfigStore, ParsedSection};
