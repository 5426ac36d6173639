// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for pit-testparser

use thiserror::Error;

/// Errors that abort a parse call
///
/// Every other irregularity in the input (noise lines, statuses for tests that
/// never started, malformed coverage) is absorbed by the parser.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying stream could not be read (including non UTF-8 input)
    #[error("unable to read test output: {0}")]
    Read(#[from] std::io::Error),

    /// A line that mandates a duration carried an unparseable seconds token
    #[error("{pattern}: unable to parse duration {token:?}")]
    InvalidDuration {
        /// The kind of line the token came from
        pattern: &'static str,
        /// The offending token, without its unit suffix
        token: String,
    },
}

impl ParseError {
    pub(crate) fn invalid_duration(pattern: &'static str, token: &str) -> Self {
        Self::InvalidDuration {
            pattern,
            token: token.to_string(),
        }
    }
}
