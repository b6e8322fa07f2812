//! Suite assembly.
//!
//! Wires cases, fixture hooks, reporter, and clock into a runnable
//! [`TestSuite`]. Configuration is collected by a builder and validated
//! once in `build()`.

use crate::application::case::TestCase;
use crate::application::context::TestContext;
use crate::application::metrics::RunMetrics;
use crate::application::ports::{Clock, Fixture, Reporter};
use crate::application::runner::TestRunner;
use crate::domain::summary::RunSummary;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::console::ConsoleReporter;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Error returned when building a TestSuite fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two cases were registered under the same name
    DuplicateCase(String),
    /// Both a fixture and standalone set-up/tear-down hooks were given
    ConflictingFixture,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::DuplicateCase(name) => {
                write!(f, "duplicate test case name: {}", name)
            }
            BuildError::ConflictingFixture => {
                write!(
                    f,
                    "with_fixture cannot be combined with with_set_up/with_tear_down"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

type Hook = Arc<dyn Fn(&TestContext) + Send + Sync>;

/// Fixture assembled from optional set-up/tear-down closures.
struct HookFixture {
    set_up: Option<Hook>,
    tear_down: Option<Hook>,
}

impl Fixture for HookFixture {
    fn set_up(&self, ctx: &TestContext) {
        if let Some(hook) = &self.set_up {
            hook(ctx);
        }
    }

    fn tear_down(&self, ctx: &TestContext) {
        if let Some(hook) = &self.tear_down {
            hook(ctx);
        }
    }
}

/// Builder for constructing a `TestSuite`.
pub struct TestSuiteBuilder {
    name: String,
    cases: Vec<TestCase>,
    set_up: Option<Hook>,
    tear_down: Option<Hook>,
    fixture: Option<Arc<dyn Fixture>>,
    reporter: Option<Arc<dyn Reporter>>,
    clock: Option<Arc<dyn Clock>>,
}

impl TestSuiteBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
            set_up: None,
            tear_down: None,
            fixture: None,
            reporter: None,
            clock: None,
        }
    }

    /// Register a test case under a name.
    ///
    /// Names must be unique within the suite; duplicates are rejected
    /// when `build()` is called.
    pub fn case(mut self, name: impl Into<String>, body: impl Fn(&TestContext) + 'static) -> Self {
        self.cases.push(TestCase::new(name, body));
        self
    }

    /// Register an already-constructed case.
    pub fn add_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Set a hook invoked before every case body.
    pub fn with_set_up(mut self, hook: impl Fn(&TestContext) + Send + Sync + 'static) -> Self {
        self.set_up = Some(Arc::new(hook));
        self
    }

    /// Set a hook invoked after every case body, regardless of outcome.
    pub fn with_tear_down(mut self, hook: impl Fn(&TestContext) + Send + Sync + 'static) -> Self {
        self.tear_down = Some(Arc::new(hook));
        self
    }

    /// Set a full fixture implementation instead of standalone hooks.
    ///
    /// Mutually exclusive with `with_set_up`/`with_tear_down`; the
    /// conflict is reported by `build()`.
    pub fn with_fixture(mut self, fixture: Arc<dyn Fixture>) -> Self {
        self.fixture = Some(fixture);
        self
    }

    /// Set the reporter receiving results. Defaults to `ConsoleReporter`.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Set a custom clock (mainly for testing). Defaults to `SystemClock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and assemble the suite.
    ///
    /// # Errors
    /// `BuildError::DuplicateCase` if two cases share a name,
    /// `BuildError::ConflictingFixture` if both a fixture and hooks were
    /// configured.
    pub fn build(self) -> Result<TestSuite, BuildError> {
        let mut seen = BTreeSet::new();
        for case in &self.cases {
            if !seen.insert(case.name().to_string()) {
                return Err(BuildError::DuplicateCase(case.name().to_string()));
            }
        }

        let fixture: Arc<dyn Fixture> = match self.fixture {
            Some(fixture) => {
                if self.set_up.is_some() || self.tear_down.is_some() {
                    return Err(BuildError::ConflictingFixture);
                }
                fixture
            }
            None => Arc::new(HookFixture {
                set_up: self.set_up,
                tear_down: self.tear_down,
            }),
        };

        let reporter = self
            .reporter
            .unwrap_or_else(|| Arc::new(ConsoleReporter::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let metrics = RunMetrics::new();

        Ok(TestSuite {
            name: self.name,
            cases: self.cases,
            metrics: metrics.clone(),
            runner: TestRunner::new(clock, reporter, fixture, metrics),
        })
    }
}

/// A named, runnable collection of test cases.
pub struct TestSuite {
    name: String,
    cases: Vec<TestCase>,
    runner: TestRunner,
    metrics: RunMetrics,
}

impl TestSuite {
    /// Start building a suite with the given name.
    pub fn builder(name: impl Into<String>) -> TestSuiteBuilder {
        TestSuiteBuilder::new(name)
    }

    /// The suite's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if the suite has no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Metrics collected across runs of this suite.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Run every case in registration order and return the summary.
    pub fn run(&self) -> RunSummary {
        tracing::debug!(suite = %self.name, cases = self.cases.len(), "starting test run");
        self.runner.run(&self.cases)
    }
}
