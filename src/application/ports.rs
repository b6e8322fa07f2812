//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::application::context::TestContext;
use crate::domain::outcome::TestResult;
use crate::domain::summary::RunSummary;
use std::fmt::Debug;
use std::time::Instant;

/// Port for obtaining current time.
///
/// This abstraction allows the runner to measure case durations without
/// depending on system clock implementation details. Infrastructure
/// provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Port for reporting test outcomes.
///
/// The runner pushes each case result as it is produced and the summary
/// once at the end. Infrastructure provides concrete implementations
/// (ConsoleReporter, JsonReporter, CaptureReporter).
pub trait Reporter: Send + Sync {
    /// Called after each case finishes, in execution order.
    fn case_finished(&self, result: &TestResult);

    /// Called once after the last case, with the aggregated summary.
    fn run_finished(&self, summary: &RunSummary);
}

/// Port for per-case set-up and tear-down.
///
/// The runner invokes `set_up` before each case body and `tear_down`
/// after it, unconditionally - tear-down runs even when set-up or the
/// body panicked. Both hooks receive the case's fixture context and may
/// register expectations on it.
pub trait Fixture: Send + Sync {
    /// Prepare resources before a case body runs.
    fn set_up(&self, _ctx: &TestContext) {}

    /// Release resources after a case body ran, regardless of outcome.
    fn tear_down(&self, _ctx: &TestContext) {}
}

/// Fixture that does nothing on either hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFixture;

impl Fixture for NoopFixture {}
