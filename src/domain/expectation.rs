//! Call expectations for mocked dependencies.
//!
//! An expectation pairs the argument a mocked function must be called with
//! and the value the mock returns for that call. Expectations are consumed
//! in registration order; any divergence between the registered and the
//! actual call sequence is an error.

use std::collections::VecDeque;
use std::fmt;
use std::fmt::Debug;

/// A single registered call expectation.
///
/// Created by `expect_and_return`-style registration and consumed by the
/// matching real invocation of the mocked function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation<A, R> {
    /// The argument the mocked function must be called with
    pub arg: A,
    /// The value the mock returns for the matching call
    pub ret: R,
}

/// Error produced when the real call sequence diverges from the
/// registered expectations.
///
/// Arguments are rendered to strings at construction time so the error
/// stays free of the mock's generic parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    /// The mocked function was invoked with no expectation registered
    UnexpectedCall {
        /// Name of the mocked function
        function: &'static str,
        /// Rendered actual argument
        actual: String,
    },
    /// The actual argument did not equal the expected argument
    ArgumentMismatch {
        /// Name of the mocked function
        function: &'static str,
        /// Rendered expected argument
        expected: String,
        /// Rendered actual argument
        actual: String,
    },
    /// Expectations were still queued when the test ended
    UnmetExpectations {
        /// Name of the mocked function
        function: &'static str,
        /// Number of expectations never consumed
        remaining: usize,
    },
}

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockError::UnexpectedCall { function, actual } => {
                write!(f, "unexpected call {}({}) with no expectation queued", function, actual)
            }
            MockError::ArgumentMismatch {
                function,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "argument mismatch: expected {}({}), got {}({})",
                    function, expected, function, actual
                )
            }
            MockError::UnmetExpectations {
                function,
                remaining,
            } => {
                write!(
                    f,
                    "{} expectation(s) for {} were registered but never called",
                    remaining, function
                )
            }
        }
    }
}

impl std::error::Error for MockError {}

/// Ordered queue of expectations for one mocked function.
///
/// Each real invocation consumes the oldest expectation. The queue knows
/// the mocked function's name so its errors identify the offender.
///
/// # Example
/// ```
/// use mockunit::domain::expectation::ExpectationQueue;
///
/// let mut queue = ExpectationQueue::new("malloc");
/// queue.expect(10usize, None::<u32>);
///
/// assert_eq!(queue.consume(&10), Ok(None));
/// assert!(queue.verify().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExpectationQueue<A, R> {
    function: &'static str,
    queue: VecDeque<Expectation<A, R>>,
}

impl<A, R> ExpectationQueue<A, R>
where
    A: PartialEq + Debug,
{
    /// Create an empty queue for the named function.
    pub fn new(function: &'static str) -> Self {
        Self {
            function,
            queue: VecDeque::new(),
        }
    }

    /// Name of the mocked function this queue belongs to.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Register an expectation: the next unmatched call must pass `arg`
    /// and will receive `ret`.
    pub fn expect(&mut self, arg: A, ret: R) {
        self.queue.push_back(Expectation { arg, ret });
    }

    /// Consume the oldest expectation against an actual call.
    ///
    /// Pops the front of the queue, compares arguments, and returns the
    /// registered value on a match. The expectation is consumed even on a
    /// mismatch, so exact call-count accounting stays intact.
    ///
    /// # Errors
    /// `MockError::UnexpectedCall` if the queue is empty,
    /// `MockError::ArgumentMismatch` if the argument differs.
    pub fn consume(&mut self, actual: &A) -> Result<R, MockError> {
        let Some(expectation) = self.queue.pop_front() else {
            return Err(MockError::UnexpectedCall {
                function: self.function,
                actual: format!("{:?}", actual),
            });
        };

        if expectation.arg != *actual {
            return Err(MockError::ArgumentMismatch {
                function: self.function,
                expected: format!("{:?}", expectation.arg),
                actual: format!("{:?}", actual),
            });
        }

        Ok(expectation.ret)
    }

    /// Number of expectations not yet consumed.
    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }

    /// Check whether every registered expectation has been consumed.
    ///
    /// # Errors
    /// `MockError::UnmetExpectations` if any expectation is still queued.
    pub fn verify(&self) -> Result<(), MockError> {
        if self.queue.is_empty() {
            Ok(())
        } else {
            Err(MockError::UnmetExpectations {
                function: self.function,
                remaining: self.queue.len(),
            })
        }
    }

    /// Drop all queued expectations.
    pub fn reset(&mut self) {
        self.queue.clear();
    }
}
