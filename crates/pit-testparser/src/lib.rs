// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pit-testparser: Structured results from `go test -v -cover` output
//!
//! This library crate turns the human-oriented text printed by `go test` into
//! per-package results: package and test verdicts, timings, captured test
//! logs, coverage, and build diagnostics.
//!
//! # Example
//!
//! ```no_run
//! use pit_testparser::{parse, StreamingParser};
//!
//! // Parse a complete captured stream
//! let output = std::io::stdin().lock();
//! let packages = parse(output).unwrap();
//!
//! // Or feed lines as they arrive
//! let mut parser = StreamingParser::new();
//! if let Some(pkg) = parser.process_line("ok  \texample.com/pkg\t0.108s").unwrap() {
//!     println!("{} {}", pkg.status, pkg.name);
//! }
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod duration;
pub mod error;
pub mod parser;
pub mod result;

pub use classify::{Elapsed, Line, Patterns};
pub use error::ParseError;
pub use parser::{PackageResults, StreamingParser, parse, parse_str};
pub use result::{Failure, PackageResult, Status, Test};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ParseError;
    pub use crate::parser::{StreamingParser, parse, parse_str};
    pub use crate::result::{Failure, PackageResult, Status, Test};
}
