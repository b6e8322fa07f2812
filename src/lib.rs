//! # mockunit
//!
//! A minimal unit-test harness with ordered call-expectation mocks.
//!
//! This crate provides two small collaborating contracts:
//!
//! - a **test runner** that executes named cases sequentially with
//!   guaranteed `set_up`/`tear_down` discipline, isolates panics per
//!   case, and reports per-case outcomes plus a final summary;
//! - a **mock dependency layer** where a test registers ordered
//!   (argument, return value) expectations for a mocked function, and
//!   any divergence - unexpected call, wrong argument, or an
//!   expectation left unconsumed at test end - fails exactly that test.
//!
//! ## Quick Start
//!
//! ```rust
//! use mockunit::TestSuite;
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! let suite = TestSuite::builder("arithmetic")
//!     .case("adds_small_integers", |_ctx| {
//!         assert_eq!(add(1, 2), 3);
//!     })
//!     .case("stubs_a_dependency", |ctx| {
//!         let lookup = ctx.mock_fn::<u32, Option<&'static str>>("lookup");
//!         lookup.expect_and_return(7, Some("seven"));
//!         assert_eq!(lookup.call(7), Some("seven"));
//!     })
//!     .build()
//!     .unwrap();
//!
//! let summary = suite.run();
//! assert!(summary.all_passed());
//! // A test binary would finish with:
//! // std::process::exit(summary.exit_code());
//! ```
//!
//! ## Fixture discipline
//!
//! `with_set_up` runs before every case body and `with_tear_down` after
//! it, unconditionally - a panicking body never skips tear-down. Each
//! case gets a fresh [`TestContext`], so mock state cannot leak between
//! cases. After tear-down the runner verifies every mock created from
//! the context and flags unconsumed expectations as a failure.
//!
//! ## Failure isolation
//!
//! An assertion or mock failure aborts only the current case; the run
//! continues and the summary counts both outcomes. [`RunSummary::exit_code`]
//! is `0` only when every case passed, which is what a test binary
//! should exit with.
//!
//! ## Reporters
//!
//! Results stream through the [`Reporter`] port: [`ConsoleReporter`]
//! prints the classic `PASS`/`FAIL` lines, and the `json-report`
//! feature adds a [`JsonReporter`] emitting one JSON document per run.
//! The `test-helpers` feature exposes the `infrastructure::mocks`
//! test doubles (`MockClock`, `CaptureReporter`) to downstream crates.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    expectation::{Expectation, ExpectationQueue, MockError},
    outcome::{TestFailure, TestResult, TestStatus},
    summary::RunSummary,
};

pub use application::{
    case::TestCase,
    context::{MockFn, TestContext},
    metrics::{MetricsSnapshot, RunMetrics},
    ports::{Clock, Fixture, NoopFixture, Reporter},
    runner::TestRunner,
};

pub use infrastructure::{
    clock::SystemClock,
    console::ConsoleReporter,
    suite::{BuildError, TestSuite, TestSuiteBuilder},
};

#[cfg(feature = "json-report")]
pub use infrastructure::json::JsonReporter;
