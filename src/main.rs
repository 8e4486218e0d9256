// SPDX-License-Identifier: MIT OR Apache-2.0

//! counterpart: print the configured counterpart of each input string.

use anyhow::{Context, Result};
use clap::Parser;
use counterparts::adapters::{CliArgs, StreamReporter};
use counterparts::service::{resolve_all, CounterpartMapping};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // RUST_LOG in the environment takes precedence; --verbose falls back to DEBUG.
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let options = args.loader_options()?;
    let mapping =
        CounterpartMapping::load(&options).context("Failed to load counterpart configuration")?;
    let inputs = args.input_strings()?;

    let mut reporter = StreamReporter::stdio(args.no_newline);
    let rc = resolve_all(&mapping, inputs, &mut reporter, &args.batch_options())?;

    if !rc.is_success() {
        std::process::exit(rc.code());
    }
    Ok(())
}
