//! Binary entrypoint for `i3status-title-on-bar`.
use std::{io, process};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*};

/// Thread wiring and main loop.
mod app;
/// Command-line interface.
mod cli;
/// Fatal errors and exit codes.
mod error;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // stdout carries the status stream, so logs go to stderr.
    let env_filter = logging::env_filter_from_spec(&cli.log.spec());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time().with_writer(io::stderr))
        .try_init()
        .ok();

    if let Err(e) = app::run(&cli) {
        eprintln!("{e}");
        error::print_hints(&e);
        process::exit(e.exit_code());
    }
}
