// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification
//!
//! Each line of `go test -v` output is matched against a fixed table of
//! patterns, in priority order, and reported as at most one [`Line`] event
//! with its captured fields. Classification never fails: anything that does
//! not match is [`Line::Unrecognized`].
//!
//! # Example
//!
//! ```
//! use pit_testparser::classify::{Line, Patterns};
//!
//! let line = Patterns::global().classify("--- PASS: TestA (0.07s)");
//! assert_eq!(
//!     line,
//!     Line::TestStatus { verdict: "PASS", name: "TestA", seconds: "0.07" }
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

const TEST_START: &str = r"^=== RUN\s+(.+)$";
const PACKAGE_RESULT: &str = r"^(ok|FAIL)\s+(\S+)\s+(?:(\d[\w.]*)s|(\[\w+ failed\]))(?:\s+coverage:\s+(\S+)%\s+of\s+statements(?:\s+in\s+.+)?)?\s*$";
const TEST_STATUS: &str = r"^\s*--- (PASS|FAIL|SKIP): (.+) \(([^()\s]+?)(?: seconds|s)\)$";
const COVERAGE: &str = r"^coverage:\s+(\S+)%\s+of\s+statements(?:\s+in\s+.+)?$";
const OUTPUT: &str = r"^(?:    )*\t(.*)$";
const FAILURE: &str = r"^(.*?):(\d+):(\d+):(.+)$";

static PATTERNS: LazyLock<Patterns> =
    LazyLock::new(|| Patterns::new().expect("built-in line patterns are valid"));

/// What a package summary line reports in place of its elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed<'a> {
    /// Seconds token without the `s` suffix, e.g. `0.108`
    Seconds(&'a str),
    /// Bracketed marker such as `[build failed]` or `[setup failed]`
    Marker(&'a str),
}

/// A classified line of runner output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `=== RUN   TestName`
    TestStart {
        /// Test name, trimmed
        name: &'a str,
    },
    /// `ok  example.com/pkg 0.108s` or `FAIL example.com/pkg [build failed]`
    PackageResult {
        /// `ok` or `FAIL`
        verdict: &'a str,
        /// Import path of the package
        import_path: &'a str,
        /// Duration token or failure marker
        elapsed: Elapsed<'a>,
        /// Percentage token from a trailing `coverage:` fragment
        coverage: Option<&'a str>,
    },
    /// `--- PASS: TestName (0.07s)`, possibly indented for subtests
    TestStatus {
        /// `PASS`, `FAIL` or `SKIP`
        verdict: &'a str,
        /// Test name
        name: &'a str,
        /// Seconds token without its unit
        seconds: &'a str,
    },
    /// `coverage: 9.6% of statements`
    Coverage {
        /// Percentage token without the `%`
        percent: &'a str,
    },
    /// A tab-prefixed log line belonging to the running test
    Output {
        /// Text after the tab
        content: &'a str,
    },
    /// `path/file.go:7:2: message`
    Failure {
        /// Source path, may be empty
        file: &'a str,
        /// Line number digits
        row: &'a str,
        /// Column number digits
        column: &'a str,
        /// Untrimmed message text
        message: &'a str,
    },
    /// Anything else: banners, blank lines, bare `PASS`/`FAIL`, benchmarks
    Unrecognized,
}

/// The compiled recognition table
///
/// Build one with [`Patterns::new`] or share the process-wide table from
/// [`Patterns::global`]; the table is immutable once built.
#[derive(Debug, Clone)]
pub struct Patterns {
    test_start: Regex,
    package_result: Regex,
    test_status: Regex,
    coverage: Regex,
    output: Regex,
    failure: Regex,
}

impl Patterns {
    /// Compile the recognition table
    ///
    /// # Errors
    ///
    /// Returns the regex error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            test_start: Regex::new(TEST_START)?,
            package_result: Regex::new(PACKAGE_RESULT)?,
            test_status: Regex::new(TEST_STATUS)?,
            coverage: Regex::new(COVERAGE)?,
            output: Regex::new(OUTPUT)?,
            failure: Regex::new(FAILURE)?,
        })
    }

    /// The table shared by every parser in the process
    #[must_use]
    pub fn global() -> &'static Self {
        &PATTERNS
    }

    /// Classify one line, without its trailing newline
    ///
    /// Categories are tried in a fixed order and the first match wins, so a
    /// package summary is never mistaken for a test status line.
    #[must_use]
    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        if let Some(caps) = self.test_start.captures(line) {
            return Line::TestStart {
                name: caps.get(1).map_or("", |m| m.as_str().trim()),
            };
        }

        if let Some(caps) = self.package_result.captures(line) {
            let elapsed = match (caps.get(3), caps.get(4)) {
                (Some(seconds), _) => Elapsed::Seconds(seconds.as_str()),
                (None, Some(marker)) => Elapsed::Marker(marker.as_str()),
                (None, None) => return Line::Unrecognized,
            };
            return Line::PackageResult {
                verdict: group(&caps, 1),
                import_path: group(&caps, 2),
                elapsed,
                coverage: caps.get(5).map(|m| m.as_str()),
            };
        }

        if let Some(caps) = self.test_status.captures(line) {
            return Line::TestStatus {
                verdict: group(&caps, 1),
                name: group(&caps, 2),
                seconds: group(&caps, 3),
            };
        }

        if let Some(caps) = self.coverage.captures(line) {
            return Line::Coverage {
                percent: group(&caps, 1),
            };
        }

        if let Some(caps) = self.output.captures(line) {
            return Line::Output {
                content: group(&caps, 1),
            };
        }

        if let Some(caps) = self.failure.captures(line) {
            return Line::Failure {
                file: group(&caps, 1),
                row: group(&caps, 2),
                column: group(&caps, 3),
                message: group(&caps, 4),
            };
        }

        Line::Unrecognized
    }
}

fn group<'a>(caps: &regex::Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| m.as_str())
}
