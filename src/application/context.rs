//! Per-case fixture context and mock function handles.
//!
//! The runner creates a fresh [`TestContext`] for every case, so mock
//! state can never leak between cases. Tests obtain [`MockFn`] handles
//! from the context; the context keeps a verifier for each handle and
//! checks them all when the case ends.

use crate::application::metrics::RunMetrics;
use crate::domain::expectation::{ExpectationQueue, MockError};
use crate::domain::outcome::TestFailure;
use std::fmt::Debug;
use std::panic::panic_any;
use std::sync::{Arc, Mutex};

type Verifier = Box<dyn Fn() -> Result<(), MockError>>;

/// Fixture context bounding one test case.
///
/// Holds the mock verifiers registered during the case. The context is
/// passed explicitly to set-up, body, and tear-down; it is dropped when
/// the case ends, taking every mock's state with it.
///
/// # Example
/// ```
/// use mockunit::TestContext;
///
/// let ctx = TestContext::new();
/// let malloc = ctx.mock_fn::<usize, Option<u64>>("malloc");
///
/// malloc.expect_and_return(10, None);
/// assert_eq!(malloc.call(10), None);
/// assert!(ctx.verify_mocks().is_ok());
/// ```
pub struct TestContext {
    verifiers: Mutex<Vec<Verifier>>,
    metrics: RunMetrics,
}

impl TestContext {
    /// Create a standalone context with its own metrics.
    pub fn new() -> Self {
        Self::with_metrics(RunMetrics::new())
    }

    /// Create a context that reports into shared run metrics.
    pub(crate) fn with_metrics(metrics: RunMetrics) -> Self {
        Self {
            verifiers: Mutex::new(Vec::new()),
            metrics,
        }
    }

    /// Create a mock handle for the named function and register its
    /// verifier with this context.
    ///
    /// The handle is cheaply cloneable; hand a clone to the unit under
    /// test and keep one in the test body for registering expectations.
    pub fn mock_fn<A, R>(&self, function: &'static str) -> MockFn<A, R>
    where
        A: PartialEq + Debug + 'static,
        R: 'static,
    {
        let mock = MockFn {
            function,
            state: Arc::new(Mutex::new(ExpectationQueue::new(function))),
            metrics: self.metrics.clone(),
        };

        let state = Arc::clone(&mock.state);
        self.verifiers
            .lock()
            .expect("TestContext mutex poisoned - a test panicked while registering a mock")
            .push(Box::new(move || {
                state
                    .lock()
                    .expect("mock expectation queue mutex poisoned")
                    .verify()
            }));

        mock
    }

    /// Check every mock created from this context for unconsumed
    /// expectations.
    ///
    /// The runner calls this after tear-down; it is public so the
    /// context can also be driven without a runner.
    ///
    /// # Errors
    /// The first `MockError::UnmetExpectations` found, if any.
    pub fn verify_mocks(&self) -> Result<(), MockError> {
        let verifiers = self
            .verifiers
            .lock()
            .expect("TestContext mutex poisoned - a test panicked while registering a mock");
        for verify in verifiers.iter() {
            verify()?;
        }
        Ok(())
    }

    /// Metrics shared with the run this context belongs to.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self.verifiers.lock().map(|v| v.len()).unwrap_or(0);
        f.debug_struct("TestContext")
            .field("mocks", &registered)
            .finish()
    }
}

/// Handle to one mocked function.
///
/// Expectations are consumed strictly in registration order. A call that
/// finds an empty queue or a non-equal argument fails the current test
/// immediately.
pub struct MockFn<A, R> {
    function: &'static str,
    state: Arc<Mutex<ExpectationQueue<A, R>>>,
    metrics: RunMetrics,
}

impl<A, R> Clone for MockFn<A, R> {
    fn clone(&self) -> Self {
        Self {
            function: self.function,
            state: Arc::clone(&self.state),
            metrics: self.metrics.clone(),
        }
    }
}

impl<A, R> MockFn<A, R>
where
    A: PartialEq + Debug,
{
    /// Name of the mocked function.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Register an expectation: the next unmatched call must pass `arg`
    /// and will receive `ret`.
    pub fn expect_and_return(&self, arg: A, ret: R) {
        tracing::trace!(function = self.function, arg = ?arg, "registering expectation");
        self.state
            .lock()
            .expect("mock expectation queue mutex poisoned")
            .expect(arg, ret);
        self.metrics.record_expectation_registered();
    }

    /// Invoke the mock as the unit under test would.
    ///
    /// Consumes the oldest expectation and returns its registered value.
    ///
    /// # Panics
    /// Fails the current test (panics with a typed [`TestFailure`]
    /// payload the runner recognizes) when no expectation is queued or
    /// the argument does not match.
    pub fn call(&self, actual: A) -> R {
        // Consume inside a scope so the guard is released before any
        // panic; a poisoned queue would corrupt later verification.
        let outcome = {
            let mut queue = self
                .state
                .lock()
                .expect("mock expectation queue mutex poisoned");
            queue.consume(&actual)
        };

        match outcome {
            Ok(ret) => {
                self.metrics.record_expectation_consumed();
                tracing::trace!(function = self.function, "mock call matched expectation");
                ret
            }
            Err(err) => {
                tracing::error!(
                    function = self.function,
                    error = %err,
                    "mock call diverged from expectations"
                );
                panic_any(TestFailure::Mock(err))
            }
        }
    }

    /// Number of expectations not yet consumed.
    pub fn outstanding(&self) -> usize {
        self.state
            .lock()
            .expect("mock expectation queue mutex poisoned")
            .outstanding()
    }

    /// Check that every expectation has been consumed.
    ///
    /// # Errors
    /// `MockError::UnmetExpectations` if any expectation is still queued.
    pub fn verify(&self) -> Result<(), MockError> {
        self.state
            .lock()
            .expect("mock expectation queue mutex poisoned")
            .verify()
    }

    /// Drop all queued expectations.
    pub fn reset(&self) {
        self.state
            .lock()
            .expect("mock expectation queue mutex poisoned")
            .reset();
    }
}

impl<A, R> Debug for MockFn<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFn")
            .field("function", &self.function)
            .finish()
    }
}
