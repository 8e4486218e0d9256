// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument adapter.
//!
//! This module declares the `counterpart` command line and turns parsed arguments into
//! loader and batch options.
//!
//! ```rust
//! use clap::Parser;
//! use counterparts::adapters::CliArgs;
//! use counterparts::domain::ElseAction;
//!
//! let args = CliArgs::parse_from(["counterpart", "-a", "passthrough", "-e", "3", "foo"]);
//! assert_eq!(args.else_action, ElseAction::Passthrough);
//! assert_eq!(args.batch_options().else_errno, 3);
//! assert_eq!(args.strings, vec!["foo"]);
//! ```

use crate::adapters::InputStrings;
use crate::domain::{ElseAction, Result};
use crate::service::{BatchOptions, LoaderOptions};
use clap::Parser;
use std::path::PathBuf;

/// Look up a counterpart string or path for each input.
#[derive(Debug, Clone, Parser)]
#[command(name = "counterpart")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Action if missing: "passthrough" outputs the original input, "silent" echoes
    /// nothing, "error" prints a message to stderr, "exception" aborts
    #[arg(short = 'a', long, value_enum, default_value_t = ElseAction::Exception)]
    pub else_action: ElseAction,

    /// Return code when no mapping is found (0 means no error)
    #[arg(short = 'e', long, default_value_t = 1, allow_negative_numbers = true)]
    pub else_errno: i32,

    /// Take input strings from the given file, or '-' for STDIN
    #[arg(short = 'i', long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Print output without a trailing newline
    #[arg(short = 'n', long)]
    pub no_newline: bool,

    /// Configuration file to use for lookups (replaces ./.counterc but not ~/.counterc)
    #[arg(short = 'c', long, env = "COUNTERPART_CONFIG", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Do not read ~/.counterc
    #[arg(long)]
    pub skip_home: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,

    /// Strings to look up, after any read from --input
    pub strings: Vec<String>,
}

impl CliArgs {
    /// Returns the loader options for this invocation.
    pub fn loader_options(&self) -> Result<LoaderOptions> {
        LoaderOptions::builder()
            .with_optional_config_file(self.config_file.clone())
            .skip_home(self.skip_home)
            .build()
    }

    /// Returns the batch options for this invocation.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            else_action: self.else_action,
            else_errno: self.else_errno,
        }
    }

    /// Opens the input strings for this invocation.
    pub fn input_strings(&self) -> Result<InputStrings> {
        InputStrings::new(self.input.as_deref(), self.strings.clone())
    }
}
