// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test result types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Verdict of a test or a package run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Test or package passed
    Pass,
    /// Test or package failed
    Fail,
    /// Test was skipped
    Skip,
}

impl Status {
    /// Map a verdict token from the runner output to a status
    ///
    /// Case-insensitive: `fail`/`failed` map to [`Status::Fail`], `ok`/`pass`
    /// to [`Status::Pass`], and anything else to [`Status::Skip`].
    #[must_use]
    pub fn from_verdict(verdict: &str) -> Self {
        let is = |candidate: &str| verdict.eq_ignore_ascii_case(candidate);
        if is("fail") || is("failed") {
            Self::Fail
        } else if is("ok") || is("pass") {
            Self::Pass
        } else {
            Self::Skip
        }
    }

    /// Canonical upper-case form
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    /// Test name, `/`-separated for subtests
    pub name: String,
    /// Verdict, `None` until a status line for the test is seen
    pub status: Option<Status>,
    /// Elapsed time reported by the status line
    #[serde(with = "crate::duration")]
    pub duration: Duration,
    /// Captured log lines, in source order
    pub output: Vec<String>,
}

impl Test {
    /// Create a started test with no verdict yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            duration: Duration::ZERO,
            output: Vec::new(),
        }
    }

    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Some(Status::Pass)
    }

    /// Check if the test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == Some(Status::Fail)
    }

    /// Check if the test is a subtest (`Parent/child`)
    #[must_use]
    pub fn is_subtest(&self) -> bool {
        self.name.contains('/')
    }

    /// Name of the enclosing test, for subtests
    ///
    /// `TestGreeting/strange/deep` yields `TestGreeting/strange`.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.name.rsplit_once('/').map(|(parent, _)| parent)
    }
}

/// A compiler or build diagnostic pointing at a source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Source file, may be empty
    #[serde(rename = "filename")]
    pub file: String,
    /// 1-based line number
    pub row: u32,
    /// 1-based column number
    pub column: u32,
    /// Diagnostic text, trimmed
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.row, self.column, self.message
        )
    }
}

/// Outcome of one test-runner invocation for one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResult {
    /// Import path of the package
    pub name: String,
    /// Package verdict
    pub status: Status,
    /// Elapsed time, zero when the run never executed
    #[serde(with = "crate::duration")]
    pub duration: Duration,
    /// Statement coverage percentage, 0 when not reported
    pub coverage: f64,
    /// Annotation such as `[build failed]`, empty for a normal run
    pub summary: String,
    /// Tests in the order they started
    pub tests: Vec<Test>,
    /// Build diagnostics seen before the summary line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Failure>,
}

impl PackageResult {
    /// Check if the package passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    /// Check if the package failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == Status::Fail
    }

    /// Check if any build diagnostics were captured
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get failing tests
    #[must_use]
    pub fn failing_tests(&self) -> Vec<&Test> {
        self.tests.iter().filter(|t| t.failed()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn package() -> PackageResult {
        PackageResult {
            name: "example.com/pkg".to_string(),
            status: Status::Fail,
            duration: Duration::from_millis(108),
            coverage: 9.6,
            summary: String::new(),
            tests: vec![
                Test {
                    name: "TestA".to_string(),
                    status: Some(Status::Pass),
                    duration: Duration::from_millis(70),
                    output: vec!["context_test.go:17: 0 connected devices".to_string()],
                },
                Test {
                    name: "TestB".to_string(),
                    status: Some(Status::Fail),
                    duration: Duration::ZERO,
                    output: Vec::new(),
                },
            ],
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_status_from_verdict() {
        assert_eq!(Status::from_verdict("ok"), Status::Pass);
        assert_eq!(Status::from_verdict("PASS"), Status::Pass);
        assert_eq!(Status::from_verdict("FAIL"), Status::Fail);
        assert_eq!(Status::from_verdict("Failed"), Status::Fail);
        assert_eq!(Status::from_verdict("SKIP"), Status::Skip);
        assert_eq!(Status::from_verdict("anything"), Status::Skip);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Pass.to_string(), "PASS");
        assert_eq!(Status::Fail.to_string(), "FAIL");
        assert_eq!(Status::Skip.to_string(), "SKIP");
    }

    #[test]
    fn test_subtest_names() {
        let parent = Test::new("TestGreeting");
        assert!(!parent.is_subtest());
        assert_eq!(parent.parent_name(), None);

        let child = Test::new("TestGreeting/strange/deep");
        assert!(child.is_subtest());
        assert_eq!(child.parent_name(), Some("TestGreeting/strange"));
    }

    #[test]
    fn test_new_test_is_unset() {
        let test = Test::new("TestA");
        assert_eq!(test.status, None);
        assert!(!test.passed());
        assert!(!test.failed());
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure {
            file: "./pkg_test.go".to_string(),
            row: 7,
            column: 2,
            message: "imported and not used: \"foo\"".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "./pkg_test.go:7:2: imported and not used: \"foo\""
        );
    }

    #[test]
    fn test_package_helpers() {
        let pkg = package();
        assert!(pkg.failed());
        assert!(!pkg.passed());
        assert!(!pkg.has_errors());
        assert_eq!(pkg.failing_tests().len(), 1);
        assert_eq!(pkg.failing_tests()[0].name, "TestB");
    }

    #[test]
    fn test_package_json_shape() {
        let json = serde_json::to_value(package()).expect("serialize");
        assert_eq!(json["status"], "FAIL");
        assert_eq!(json["duration"], "108ms");
        assert_eq!(json["coverage"], 9.6);
        assert_eq!(json["tests"][0]["status"], "PASS");
        assert_eq!(json["tests"][0]["duration"], "70ms");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_failure_json_uses_filename() {
        let mut pkg = package();
        pkg.errors.push(Failure {
            file: "a.go".to_string(),
            row: 1,
            column: 2,
            message: "boom".to_string(),
        });
        let json = serde_json::to_value(&pkg).expect("serialize");
        assert_eq!(json["errors"][0]["filename"], "a.go");
        assert_eq!(json["errors"][0]["row"], 1);

        let back: PackageResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, pkg);
    }
}
