//! Test runner coordination logic.
//!
//! The runner executes cases sequentially with guaranteed fixture
//! discipline: set-up before each body, tear-down after it regardless of
//! outcome, mock verification after tear-down. A panic anywhere is
//! contained to the current case; the run always continues.

use crate::application::case::TestCase;
use crate::application::context::TestContext;
use crate::application::metrics::RunMetrics;
use crate::application::ports::{Clock, Fixture, Reporter};
use crate::domain::outcome::{TestFailure, TestResult};
use crate::domain::summary::RunSummary;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Executes test cases and collects their results.
pub struct TestRunner {
    clock: Arc<dyn Clock>,
    reporter: Arc<dyn Reporter>,
    fixture: Arc<dyn Fixture>,
    metrics: RunMetrics,
}

impl TestRunner {
    /// Create a new runner.
    ///
    /// # Arguments
    /// * `clock` - Time source for case and run durations
    /// * `reporter` - Sink for per-case results and the final summary
    /// * `fixture` - Set-up/tear-down hooks applied around every case
    /// * `metrics` - Shared run metrics, also handed to each case context
    pub fn new(
        clock: Arc<dyn Clock>,
        reporter: Arc<dyn Reporter>,
        fixture: Arc<dyn Fixture>,
        metrics: RunMetrics,
    ) -> Self {
        Self {
            clock,
            reporter,
            fixture,
            metrics,
        }
    }

    /// Run every case in order and return the aggregated summary.
    ///
    /// Each result is pushed to the reporter as it is produced; the
    /// summary is pushed once after the last case.
    pub fn run(&self, cases: &[TestCase]) -> RunSummary {
        let run_start = self.clock.now();
        let mut summary = RunSummary::new();

        for case in cases {
            let result = self.run_case(case);
            summary.record(&result);
            self.reporter.case_finished(&result);
        }

        summary.duration = self.clock.now().saturating_duration_since(run_start);
        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            "test run finished"
        );
        self.reporter.run_finished(&summary);
        summary
    }

    /// Run a single case under full fixture discipline.
    fn run_case(&self, case: &TestCase) -> TestResult {
        tracing::debug!(test = case.name(), "running test case");

        let ctx = TestContext::with_metrics(self.metrics.clone());
        let start = self.clock.now();
        let mut failure: Option<TestFailure> = None;

        // Set-up. A panic here skips the body but not tear-down.
        let set_up_ok = match catch_unwind(AssertUnwindSafe(|| self.fixture.set_up(&ctx))) {
            Ok(()) => true,
            Err(payload) => {
                failure = Some(failure_from_panic(payload, TestFailure::SetUpPanicked));
                false
            }
        };

        if set_up_ok {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| case.run(&ctx))) {
                failure = Some(failure_from_panic(payload, TestFailure::Assertion));
            }
        }

        // Tear-down runs unconditionally. The first failure wins, so a
        // tear-down panic is only recorded for otherwise-passing cases.
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| self.fixture.tear_down(&ctx))) {
            let teardown_failure = failure_from_panic(payload, TestFailure::TearDownPanicked);
            failure.get_or_insert(teardown_failure);
        }

        if failure.is_none() {
            if let Err(err) = ctx.verify_mocks() {
                failure = Some(TestFailure::Mock(err));
            }
        }

        let duration = self.clock.now().saturating_duration_since(start);
        self.metrics.record_case_run();

        match failure {
            None => TestResult::passed(case.name(), duration),
            Some(failure) => {
                self.metrics.record_case_failed();
                tracing::warn!(test = case.name(), failure = %failure, "test case failed");
                TestResult::failed(case.name(), failure, duration)
            }
        }
    }

    /// Metrics shared across every case of this runner.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

/// Turn a panic payload into a test failure.
///
/// Typed payloads from the mock layer pass through unchanged; string
/// payloads from the `assert!` family are wrapped by `wrap`.
fn failure_from_panic(
    payload: Box<dyn Any + Send>,
    wrap: impl FnOnce(String) -> TestFailure,
) -> TestFailure {
    match payload.downcast::<TestFailure>() {
        Ok(failure) => *failure,
        Err(payload) => wrap(panic_message(payload)),
    }
}

/// Render a panic payload as a message.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else {
        "panic payload of unknown type".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expectation::MockError;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::mocks::{CaptureReporter, MockClock};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct RecordingFixture {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Fixture for RecordingFixture {
        fn set_up(&self, _ctx: &TestContext) {
            self.log.lock().unwrap().push("set_up");
        }

        fn tear_down(&self, _ctx: &TestContext) {
            self.log.lock().unwrap().push("tear_down");
        }
    }

    struct PanickingSetUp;

    impl Fixture for PanickingSetUp {
        fn set_up(&self, _ctx: &TestContext) {
            panic!("set-up exploded");
        }
    }

    fn runner_with(fixture: Arc<dyn Fixture>) -> (TestRunner, Arc<CaptureReporter>) {
        let reporter = Arc::new(CaptureReporter::new());
        let runner = TestRunner::new(
            Arc::new(SystemClock::new()),
            reporter.clone(),
            fixture,
            RunMetrics::new(),
        );
        (runner, reporter)
    }

    #[test]
    fn test_passing_and_failing_cases_are_both_recorded() {
        let (runner, reporter) = runner_with(Arc::new(crate::application::ports::NoopFixture));

        let cases = vec![
            TestCase::new("passes", |_ctx| assert_eq!(1 + 2, 3)),
            TestCase::new("fails", |_ctx| assert_eq!(1 + 2, 4)),
            TestCase::new("also_passes", |_ctx| {}),
        ];

        let summary = runner.run(&cases);

        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);

        // The failing case did not stop the run.
        let results = reporter.captured_results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].name, "also_passes");
        assert!(results[2].status.is_passed());
    }

    #[test]
    fn test_fixture_order_and_teardown_on_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (runner, _reporter) = runner_with(Arc::new(RecordingFixture { log: log.clone() }));

        let log_clone = log.clone();
        let cases = vec![
            TestCase::new("body_runs_between_hooks", move |_ctx| {
                log_clone.lock().unwrap().push("body");
            }),
            TestCase::new("panics", |_ctx| panic!("boom")),
        ];

        runner.run(&cases);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["set_up", "body", "tear_down", "set_up", "tear_down"]
        );
    }

    #[test]
    fn test_set_up_panic_skips_body_but_not_teardown() {
        let ran = Arc::new(Mutex::new(false));
        let (runner, reporter) = runner_with(Arc::new(PanickingSetUp));

        let ran_clone = ran.clone();
        let cases = vec![TestCase::new("never_runs", move |_ctx| {
            *ran_clone.lock().unwrap() = true;
        })];

        let summary = runner.run(&cases);

        assert!(!*ran.lock().unwrap(), "body must not run after set-up panic");
        assert_eq!(summary.failed, 1);

        let results = reporter.captured_results();
        match results[0].status.failure() {
            Some(TestFailure::SetUpPanicked(message)) => {
                assert!(message.contains("set-up exploded"));
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_unmet_expectation_fails_at_teardown() {
        let (runner, reporter) = runner_with(Arc::new(crate::application::ports::NoopFixture));

        let cases = vec![TestCase::new("registers_but_never_calls", |ctx| {
            let mock = ctx.mock_fn::<usize, ()>("malloc");
            mock.expect_and_return(10, ());
            // No call - the runner must flag the leftover expectation.
        })];

        let summary = runner.run(&cases);
        assert_eq!(summary.failed, 1);

        let results = reporter.captured_results();
        assert_eq!(
            results[0].status.failure(),
            Some(&TestFailure::Mock(MockError::UnmetExpectations {
                function: "malloc",
                remaining: 1,
            }))
        );
    }

    #[test]
    fn test_mock_divergence_keeps_its_typed_failure() {
        let (runner, reporter) = runner_with(Arc::new(crate::application::ports::NoopFixture));

        let cases = vec![TestCase::new("wrong_argument", |ctx| {
            let mock = ctx.mock_fn::<usize, ()>("malloc");
            mock.expect_and_return(10, ());
            mock.call(20);
        })];

        runner.run(&cases);

        let results = reporter.captured_results();
        assert!(matches!(
            results[0].status.failure(),
            Some(TestFailure::Mock(MockError::ArgumentMismatch { .. }))
        ));
    }

    #[test]
    fn test_contexts_are_fresh_per_case() {
        let (runner, _reporter) = runner_with(Arc::new(crate::application::ports::NoopFixture));

        // If mock state leaked across cases, the second case would see
        // the first case's expectation and fail verification.
        let cases = vec![
            TestCase::new("first", |ctx| {
                let mock = ctx.mock_fn::<usize, ()>("shared_name");
                mock.expect_and_return(1, ());
                mock.call(1);
            }),
            TestCase::new("second", |ctx| {
                let mock = ctx.mock_fn::<usize, ()>("shared_name");
                assert_eq!(mock.outstanding(), 0);
            }),
        ];

        let summary = runner.run(&cases);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_durations_come_from_the_clock() {
        let start = Instant::now();
        let clock = Arc::new(MockClock::new(start));
        let reporter = Arc::new(CaptureReporter::new());
        let runner = TestRunner::new(
            clock.clone(),
            reporter.clone(),
            Arc::new(crate::application::ports::NoopFixture),
            RunMetrics::new(),
        );

        let tick = clock.clone();
        let cases = vec![TestCase::new("advances_time", move |_ctx| {
            tick.advance(Duration::from_millis(250));
        })];

        runner.run(&cases);

        let results = reporter.captured_results();
        assert_eq!(results[0].duration, Duration::from_millis(250));
    }

    #[test]
    fn test_runner_metrics() {
        let (runner, _reporter) = runner_with(Arc::new(crate::application::ports::NoopFixture));

        let cases = vec![
            TestCase::new("ok", |_ctx| {}),
            TestCase::new("bad", |_ctx| panic!("no")),
        ];
        runner.run(&cases);

        let snapshot = runner.metrics().snapshot();
        assert_eq!(snapshot.cases_run, 2);
        assert_eq!(snapshot.cases_failed, 1);
    }

    #[test]
    fn test_panic_message_for_str_and_string() {
        assert_eq!(panic_message(Box::new("literal")), "literal");
        assert_eq!(panic_message(Box::new("owned".to_string())), "owned");
        assert_eq!(
            panic_message(Box::new(42u32)),
            "panic payload of unknown type"
        );
    }
}
