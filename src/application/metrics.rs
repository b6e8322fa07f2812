//! Observability metrics for test runs.
//!
//! Provides counters about runner and mock activity for monitoring and
//! debugging, shared across the runner and every mock handle of a run.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking test run statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Cloning is cheap; clones share the same underlying counters.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of cases executed
    cases_run: AtomicU64,
    /// Total number of cases that failed
    cases_failed: AtomicU64,
    /// Total number of expectations registered on mocks
    expectations_registered: AtomicU64,
    /// Total number of expectations consumed by matching calls
    expectations_consumed: AtomicU64,
}

impl RunMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                cases_run: AtomicU64::new(0),
                cases_failed: AtomicU64::new(0),
                expectations_registered: AtomicU64::new(0),
                expectations_consumed: AtomicU64::new(0),
            }),
        }
    }

    /// Record an executed case.
    pub(crate) fn record_case_run(&self) {
        self.inner.cases_run.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed case.
    pub(crate) fn record_case_failed(&self) {
        self.inner.cases_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a registered expectation.
    pub(crate) fn record_expectation_registered(&self) {
        self.inner
            .expectations_registered
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a consumed expectation.
    pub(crate) fn record_expectation_consumed(&self) {
        self.inner
            .expectations_consumed
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of cases executed.
    pub fn cases_run(&self) -> u64 {
        self.inner.cases_run.load(Ordering::Relaxed)
    }

    /// Get the total number of failed cases.
    pub fn cases_failed(&self) -> u64 {
        self.inner.cases_failed.load(Ordering::Relaxed)
    }

    /// Get the total number of registered expectations.
    pub fn expectations_registered(&self) -> u64 {
        self.inner.expectations_registered.load(Ordering::Relaxed)
    }

    /// Get the total number of consumed expectations.
    pub fn expectations_consumed(&self) -> u64 {
        self.inner.expectations_consumed.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cases_run: self.cases_run(),
            cases_failed: self.cases_failed(),
            expectations_registered: self.expectations_registered(),
            expectations_consumed: self.expectations_consumed(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.cases_run.store(0, Ordering::Relaxed);
        self.inner.cases_failed.store(0, Ordering::Relaxed);
        self.inner.expectations_registered.store(0, Ordering::Relaxed);
        self.inner.expectations_consumed.store(0, Ordering::Relaxed);
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of cases executed
    pub cases_run: u64,
    /// Total number of failed cases
    pub cases_failed: u64,
    /// Total number of registered expectations
    pub expectations_registered: u64,
    /// Total number of consumed expectations
    pub expectations_consumed: u64,
}

impl MetricsSnapshot {
    /// Expectations registered but never consumed by a matching call.
    pub fn expectations_outstanding(&self) -> u64 {
        self.expectations_registered
            .saturating_sub(self.expectations_consumed)
    }
}
