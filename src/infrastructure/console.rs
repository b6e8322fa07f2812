//! Console reporter.
//!
//! Prints one line per test and a final summary, the classic test binary
//! surface: `PASS <name>` / `FAIL <name>: <reason>`.

use crate::application::ports::Reporter;
use crate::domain::outcome::{TestResult, TestStatus};
use crate::domain::summary::RunSummary;
use std::io::Write;
use std::sync::Mutex;

/// Reporter writing per-test lines and the summary to a writer.
///
/// Defaults to standard output. Output errors are ignored; a reporter
/// must never fail the run it is reporting on.
pub struct ConsoleReporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleReporter {
    /// Create a reporter writing to standard output.
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Create a reporter writing to an arbitrary sink.
    ///
    /// Useful for capturing output in tests or silencing it in benches
    /// (`std::io::sink()`).
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn case_finished(&self, result: &TestResult) {
        let mut writer = self
            .writer
            .lock()
            .expect("ConsoleReporter mutex poisoned - a reporter write panicked");
        let _ = match &result.status {
            TestStatus::Passed => writeln!(writer, "PASS {}", result.name),
            TestStatus::Failed(failure) => writeln!(writer, "FAIL {}: {}", result.name, failure),
        };
    }

    fn run_finished(&self, summary: &RunSummary) {
        let mut writer = self
            .writer
            .lock()
            .expect("ConsoleReporter mutex poisoned - a reporter write panicked");
        let _ = writeln!(writer, "{}", summary);
        let _ = writer.flush();
    }
}
