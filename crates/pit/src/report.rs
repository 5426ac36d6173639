// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Parse captured output and write it as JSON

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::Context;
use pit_testparser::{PackageResult, parse};
use tracing::{debug, info};

use crate::config::Config;

/// What a run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Number of package results written
    pub packages: usize,
    /// Number of those packages that failed
    pub failed: usize,
}

impl Outcome {
    /// Summarise a set of package results
    #[must_use]
    pub fn of(results: &[PackageResult]) -> Self {
        Self {
            packages: results.len(),
            failed: results.iter().filter(|r| r.failed()).count(),
        }
    }

    /// Check if the process should exit unsuccessfully
    #[must_use]
    pub fn is_failure(&self, config: &Config) -> bool {
        config.exit_code && self.failed > 0
    }
}

/// Read the configured input, parse it, and write the results to `out`
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be
/// opened or parsed, or the JSON cannot be written.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<Outcome> {
    config.validate()?;

    let results = match config.input_path() {
        Some(path) => {
            debug!(path = %path.display(), "reading test output from file");
            let file = File::open(path)
                .with_context(|| format!("unable to open {}", path.display()))?;
            parse(BufReader::new(file))
        }
        None => {
            debug!("reading test output from stdin");
            parse(io::stdin().lock())
        }
    }
    .context("unable to parse test output")?;

    let outcome = Outcome::of(&results);
    info!(
        packages = outcome.packages,
        failed = outcome.failed,
        "parsed test output"
    );

    write_json(&results, config.pretty, out)?;
    Ok(outcome)
}

/// Write package results as a JSON array followed by a newline
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json(
    results: &[PackageResult],
    pretty: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, results)?;
    } else {
        serde_json::to_writer(&mut *out, results)?;
    }
    writeln!(out)?;
    Ok(())
}
