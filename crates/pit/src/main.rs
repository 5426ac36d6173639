// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pit: structured results from captured `go test -v -cover` output
//!
//! This binary reads the combined output of a `go test` run and writes the
//! per-package results to stdout as JSON.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pit::config::Config;
use pit::report;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    match report::run(&config, &mut io::stdout().lock()) {
        Ok(outcome) if outcome.is_failure(&config) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
