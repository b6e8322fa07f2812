//! Test outcomes and failure kinds.
//!
//! A test case ends in exactly one status. Failures carry enough context
//! to produce a one-line diagnostic without re-running the case.

use crate::domain::expectation::MockError;
use std::fmt;
use std::time::Duration;

/// Why a test case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestFailure {
    /// An assertion in the test body panicked
    Assertion(String),
    /// A mocked dependency diverged from its expectations
    Mock(MockError),
    /// The set-up hook panicked before the body ran
    SetUpPanicked(String),
    /// The tear-down hook panicked after the body ran
    TearDownPanicked(String),
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFailure::Assertion(message) => write!(f, "assertion failed: {}", message),
            TestFailure::Mock(err) => write!(f, "mock expectation failed: {}", err),
            TestFailure::SetUpPanicked(message) => write!(f, "set-up panicked: {}", message),
            TestFailure::TearDownPanicked(message) => {
                write!(f, "tear-down panicked: {}", message)
            }
        }
    }
}

impl std::error::Error for TestFailure {}

impl From<MockError> for TestFailure {
    fn from(err: MockError) -> Self {
        TestFailure::Mock(err)
    }
}

/// Final status of a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    /// The case ran to completion without any failure
    Passed,
    /// The case failed; the reason is attached
    Failed(TestFailure),
}

impl TestStatus {
    /// Check if this status is Passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    /// Check if this status is Failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&TestFailure> {
        match self {
            TestStatus::Passed => None,
            TestStatus::Failed(failure) => Some(failure),
        }
    }
}

/// Outcome of one test case, as recorded by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Name the case was registered under
    pub name: String,
    /// Pass/fail status
    pub status: TestStatus,
    /// Wall-clock time the case took, fixtures included
    pub duration: Duration,
}

impl TestResult {
    /// Record a passing case.
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration,
        }
    }

    /// Record a failing case.
    pub fn failed(name: impl Into<String>, failure: TestFailure, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed(failure),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert!(TestStatus::Passed.is_passed());
        assert!(!TestStatus::Passed.is_failed());

        let failed = TestStatus::Failed(TestFailure::Assertion("1 != 2".to_string()));
        assert!(failed.is_failed());
        assert!(failed.failure().is_some());
        assert!(TestStatus::Passed.failure().is_none());
    }

    #[test]
    fn test_failure_display() {
        let failure = TestFailure::Assertion("left: 1, right: 2".to_string());
        assert_eq!(failure.to_string(), "assertion failed: left: 1, right: 2");

        let failure = TestFailure::SetUpPanicked("boom".to_string());
        assert!(failure.to_string().contains("set-up"));
    }

    #[test]
    fn test_mock_error_converts_to_failure() {
        let err = MockError::UnmetExpectations {
            function: "malloc",
            remaining: 1,
        };
        let failure = TestFailure::from(err.clone());

        assert_eq!(failure, TestFailure::Mock(err));
        assert!(failure.to_string().contains("malloc"));
    }

    #[test]
    fn test_result_constructors() {
        let result = TestResult::passed("adds", Duration::from_millis(2));
        assert!(result.status.is_passed());
        assert_eq!(result.name, "adds");

        let result = TestResult::failed(
            "mismatch",
            TestFailure::Assertion("nope".to_string()),
            Duration::ZERO,
        );
        assert!(result.status.is_failed());
    }
}
