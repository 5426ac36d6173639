// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! `go test -v` output parsing
//!
//! The parser makes a single forward pass over the captured output. Tests,
//! build diagnostics and coverage are accumulated per package block and
//! bundled into a [`PackageResult`] when the block's summary line
//! (`ok ...` / `FAIL ...`) arrives. State left over when the input ends
//! without a summary line is dropped.
//!
//! # Example
//!
//! ```
//! use pit_testparser::parser::parse_str;
//! use pit_testparser::Status;
//!
//! let output = "=== RUN   TestA\n--- PASS: TestA (0.07s)\nPASS\nok  \texample.com/pkg\t0.108s\n";
//! let results = parse_str(output).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].status, Status::Pass);
//! ```

use std::io::{BufRead, Lines};
use std::mem;
use std::time::Duration;

use tracing::{debug, trace};

use crate::classify::{Elapsed, Line, Patterns};
use crate::duration;
use crate::error::ParseError;
use crate::result::{Failure, PackageResult, Status, Test};

/// Parse a complete captured stream into package results
///
/// All or nothing: on error no results are returned.
///
/// # Errors
///
/// Returns `ParseError::Read` if the stream cannot be read and
/// `ParseError::InvalidDuration` if a status or summary line carries a
/// malformed duration.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<PackageResult>, ParseError> {
    PackageResults::new(reader).collect()
}

/// Parse captured output already held in memory
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(output: &str) -> Result<Vec<PackageResult>, ParseError> {
    parse(output.as_bytes())
}

/// Lazily yields package results as their summary lines are read
///
/// The iterator stops after the first error.
pub struct PackageResults<'p, R> {
    lines: Lines<R>,
    parser: StreamingParser<'p>,
    done: bool,
}

impl<R: BufRead> PackageResults<'static, R> {
    /// Read from `reader` using the process-wide pattern table
    pub fn new(reader: R) -> Self {
        Self::with_patterns(reader, Patterns::global())
    }
}

impl<'p, R: BufRead> PackageResults<'p, R> {
    /// Read from `reader` using the given pattern table
    pub fn with_patterns(reader: R, patterns: &'p Patterns) -> Self {
        Self {
            lines: reader.lines(),
            parser: StreamingParser::with_patterns(patterns),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for PackageResults<'_, R> {
    type Item = Result<PackageResult, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for line in self.lines.by_ref() {
            let step = line
                .map_err(ParseError::from)
                .and_then(|line| self.parser.process_line(&line));
            match step {
                Ok(Some(result)) => return Some(Ok(result)),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        self.done = true;
        self.parser.finish();
        None
    }
}

/// A line-at-a-time parser for incremental input
///
/// After an error the accumulated state is unspecified; start a new parser.
#[derive(Debug)]
pub struct StreamingParser<'p> {
    patterns: &'p Patterns,
    current_test: String,
    tests: Vec<Test>,
    failures: Vec<Failure>,
    coverage: f64,
}

impl StreamingParser<'static> {
    /// Create a parser using the process-wide pattern table
    #[must_use]
    pub fn new() -> Self {
        Self::with_patterns(Patterns::global())
    }
}

impl Default for StreamingParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> StreamingParser<'p> {
    /// Create a parser using the given pattern table
    #[must_use]
    pub fn with_patterns(patterns: &'p Patterns) -> Self {
        Self {
            patterns,
            current_test: String::new(),
            tests: Vec::new(),
            failures: Vec::new(),
            coverage: 0.0,
        }
    }

    /// Process a single line of output, without its newline
    ///
    /// Returns the finished package when the line is a summary line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidDuration` for a malformed duration token.
    pub fn process_line(&mut self, line: &str) -> Result<Option<PackageResult>, ParseError> {
        let classified = self.patterns.classify(line);
        self.apply(classified)
    }

    /// Advance the state machine with an already classified line
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidDuration` for a malformed duration token.
    pub fn apply(&mut self, line: Line<'_>) -> Result<Option<PackageResult>, ParseError> {
        match line {
            Line::TestStart { name } => {
                self.tests.push(Test::new(name));
                self.current_test = name.to_string();
            }
            Line::TestStatus {
                verdict,
                name,
                seconds,
            } => {
                let elapsed = duration::parse_seconds(seconds)
                    .ok_or_else(|| ParseError::invalid_duration("test status", seconds))?;
                match find_test(&mut self.tests, name) {
                    Some(test) => {
                        test.status = Some(Status::from_verdict(verdict));
                        test.duration = elapsed;
                    }
                    None => trace!(test = name, "status for a test that never started"),
                }
            }
            Line::Coverage { percent } => self.coverage = parse_percent(percent),
            Line::Output { content } => {
                if self.current_test.is_empty() {
                    trace!("output with no running test");
                } else if let Some(test) = find_test(&mut self.tests, &self.current_test) {
                    test.output.push(content.to_string());
                }
            }
            Line::Failure {
                file,
                row,
                column,
                message,
            } => self.failures.push(Failure {
                file: file.to_string(),
                row: row.parse().unwrap_or(0),
                column: column.parse().unwrap_or(0),
                message: message.trim().to_string(),
            }),
            Line::PackageResult {
                verdict,
                import_path,
                elapsed,
                coverage,
            } => return self.emit(verdict, import_path, elapsed, coverage).map(Some),
            Line::Unrecognized => {}
        }
        Ok(None)
    }

    /// Check if tests or diagnostics are waiting for a summary line
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.tests.is_empty() || !self.failures.is_empty()
    }

    /// End of input: drop any block that was never closed by a summary line
    pub fn finish(&mut self) {
        if self.has_pending() {
            debug!(
                tests = self.tests.len(),
                failures = self.failures.len(),
                "discarding output with no package summary"
            );
        }
        self.reset();
    }

    fn emit(
        &mut self,
        verdict: &str,
        import_path: &str,
        elapsed: Elapsed<'_>,
        coverage: Option<&str>,
    ) -> Result<PackageResult, ParseError> {
        let (duration, summary) = match elapsed {
            Elapsed::Seconds(token) => (
                duration::parse_seconds(token)
                    .ok_or_else(|| ParseError::invalid_duration("package result", token))?,
                String::new(),
            ),
            Elapsed::Marker(marker) => (Duration::ZERO, marker.to_string()),
        };

        let result = PackageResult {
            name: import_path.to_string(),
            status: Status::from_verdict(verdict),
            duration,
            coverage: coverage.map_or(self.coverage, parse_percent),
            summary,
            tests: mem::take(&mut self.tests),
            errors: mem::take(&mut self.failures),
        };
        self.reset();

        debug!(
            package = %result.name,
            status = %result.status,
            tests = result.tests.len(),
            errors = result.errors.len(),
            "parsed package result"
        );
        Ok(result)
    }

    fn reset(&mut self) {
        self.current_test.clear();
        self.tests.clear();
        self.failures.clear();
        self.coverage = 0.0;
    }
}

/// First test with the given name, in start order
fn find_test<'t>(tests: &'t mut [Test], name: &str) -> Option<&'t mut Test> {
    tests.iter_mut().find(|test| test.name == name)
}

/// Coverage percentages are lenient: anything unparseable counts as zero
fn parse_percent(token: &str) -> f64 {
    token
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// One complete, well-formed package block
    fn block_strategy() -> impl Strategy<Value = String> {
        (
            "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            proptest::collection::vec(
                (
                    "Test[A-Z][a-z]{0,6}",
                    prop_oneof![Just("PASS"), Just("FAIL"), Just("SKIP")],
                    0u32..5_000,
                    proptest::collection::vec("[a-z ]{0,20}", 0..3),
                ),
                0..4,
            ),
            proptest::option::of(0u32..1_000),
            prop_oneof![Just("ok"), Just("FAIL")],
        )
            .prop_map(|(path, tests, coverage, verdict)| {
                let mut out = String::new();
                for (name, status, millis, logs) in tests {
                    out.push_str(&format!("=== RUN   {name}\n"));
                    for log in logs {
                        out.push_str(&format!("\t{log}\n"));
                    }
                    out.push_str(&format!(
                        "--- {status}: {name} ({}.{:03}s)\n",
                        millis / 1000,
                        millis % 1000
                    ));
                }
                if let Some(tenths) = coverage {
                    out.push_str(&format!(
                        "coverage: {}.{}% of statements\n",
                        tenths / 10,
                        tenths % 10
                    ));
                }
                out.push_str(&format!("{verdict}  \t{path}\t0.123s\n"));
                out
            })
    }

    proptest! {
        /// Property: a complete block yields exactly one package with its path and verdict
        #[test]
        fn prop_single_block_single_result(block in block_strategy()) {
            let results = parse_str(&block).expect("Should parse");
            prop_assert_eq!(results.len(), 1);
            let summary = block.lines().last().unwrap_or_default();
            let verdict = summary.split_whitespace().next().unwrap_or_default();
            let path = summary.split_whitespace().nth(1).unwrap_or_default();
            prop_assert_eq!(&results[0].name, path);
            prop_assert_eq!(results[0].status, Status::from_verdict(verdict));
        }

        /// Property: parse(A ++ B) == parse(A) ++ parse(B)
        #[test]
        fn prop_concatenation(a in block_strategy(), b in block_strategy()) {
            let mut expected = parse_str(&a).expect("Should parse a");
            expected.extend(parse_str(&b).expect("Should parse b"));
            let joined = parse_str(&format!("{a}\n{b}")).expect("Should parse joined");
            prop_assert_eq!(joined, expected);
        }

        /// Property: a coverage value never leaks into the following package
        #[test]
        fn prop_coverage_applies_once(a in block_strategy()) {
            let input = format!("{a}ok  \tnext\t0.1s\n");
            let results = parse_str(&input).expect("Should parse");
            prop_assert_eq!(results.len(), 2);
            prop_assert_eq!(results[1].coverage, 0.0);
        }

        /// Property: trailing output with no summary line adds nothing
        #[test]
        fn prop_dangling_tail_discarded(
            a in block_strategy(),
            tail in proptest::collection::vec("=== RUN   Test[a-z]{1,5}|\t[a-z]{0,10}|[a-z]{1,5}\\.go:[1-9]:[1-9]: [a-z]{1,10}", 0..6),
        ) {
            let expected = parse_str(&a).expect("Should parse");
            let input = format!("{a}{}", tail.join("\n"));
            let results = parse_str(&input).expect("Should parse with tail");
            prop_assert_eq!(results, expected);
        }

        /// Property: output lines are kept in source order
        #[test]
        fn prop_output_order(logs in proptest::collection::vec("[a-z0-9 ]{0,16}", 0..10)) {
            let mut input = String::from("=== RUN   TestOrder\n");
            for log in &logs {
                input.push_str(&format!("\t{log}\n"));
            }
            input.push_str("--- PASS: TestOrder (0.25s)\nok  \tp\t0.3s\n");
            let results = parse_str(&input).expect("Should parse");
            prop_assert_eq!(&results[0].tests[0].output, &logs);
            prop_assert_eq!(results[0].tests[0].duration, Duration::from_millis(250));
        }
    }
}
