//! Run summaries.
//!
//! Aggregated pass/fail counts for one complete run, plus the process
//! exit code a test binary should finish with.

use crate::domain::outcome::TestResult;
use std::fmt;
use std::time::Duration;

/// Aggregated outcome of a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of cases that passed
    pub passed: usize,
    /// Number of cases that failed
    pub failed: usize,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one case result.
    pub fn record(&mut self, result: &TestResult) {
        if result.status.is_passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Total number of cases run.
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Check whether every case passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit code for a test binary: 0 on all-pass, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} test(s): {} passed, {} failed in {:?}",
            self.total(),
            self.passed,
            self.failed,
            self.duration
        )
    }
}
