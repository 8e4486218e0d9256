// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! This module contains the concrete pieces that touch the outside world: the INI file
//! reader, the input string stream, the stream reporter and, with the `cli` feature,
//! the command-line definition.

#[cfg(feature = "cli")]
pub mod cli;
pub mod ini_file;
pub mod input;
pub mod reporter;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use ini_file::{IniFileAdapter, IniParser};
pub use input::{InputStrings, STDIN_SENTINEL};
pub use reporter::StreamReporter;
