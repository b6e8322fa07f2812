//! Mock reporter for testing.

use crate::application::ports::Reporter;
use crate::domain::outcome::TestResult;
use crate::domain::summary::RunSummary;
use std::sync::{Arc, Mutex};

/// Mock reporter that captures results for testing.
#[derive(Clone, Default)]
pub struct CaptureReporter {
    results: Arc<Mutex<Vec<TestResult>>>,
    summaries: Arc<Mutex<Vec<RunSummary>>>,
}

impl CaptureReporter {
    /// Create a new capture reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured case results, in execution order.
    pub fn captured_results(&self) -> Vec<TestResult> {
        self.results
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .clone()
    }

    /// Get all captured run summaries.
    pub fn captured_summaries(&self) -> Vec<RunSummary> {
        self.summaries
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .clone()
    }

    /// Get the count of captured case results.
    pub fn count(&self) -> usize {
        self.results
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .len()
    }

    /// Clear all captured results and summaries.
    pub fn clear(&self) {
        self.results
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .clear();
        self.summaries
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .clear();
    }
}

impl Reporter for CaptureReporter {
    fn case_finished(&self, result: &TestResult) {
        self.results
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .push(result.clone());
    }

    fn run_finished(&self, summary: &RunSummary) {
        self.summaries
            .lock()
            .expect(
                "CaptureReporter mutex poisoned - a test thread panicked while holding the lock",
            )
            .push(summary.clone());
    }
}
