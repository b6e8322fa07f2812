//! Machine-readable run reports.
//!
//! Renders the whole run as a single JSON document once the last case
//! finished. Intended for CI pipelines that parse results instead of
//! scraping console lines.

use crate::application::ports::Reporter;
use crate::domain::outcome::{TestResult, TestStatus};
use crate::domain::summary::RunSummary;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

#[derive(Debug, Serialize)]
struct CaseRecord {
    name: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    duration_micros: u64,
}

#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    cases: &'a [CaseRecord],
    passed: usize,
    failed: usize,
    duration_micros: u64,
}

/// Reporter emitting one JSON document for the whole run.
///
/// Case results are buffered until `run_finished`; nothing is written
/// before that. Output errors are ignored, as with the console reporter.
pub struct JsonReporter {
    writer: Mutex<Box<dyn Write + Send>>,
    cases: Mutex<Vec<CaseRecord>>,
}

impl JsonReporter {
    /// Create a reporter writing to standard output.
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Create a reporter writing to an arbitrary sink.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            cases: Mutex::new(Vec::new()),
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn case_finished(&self, result: &TestResult) {
        let (status, message) = match &result.status {
            TestStatus::Passed => ("pass", None),
            TestStatus::Failed(failure) => ("fail", Some(failure.to_string())),
        };

        self.cases
            .lock()
            .expect("JsonReporter mutex poisoned - a reporter write panicked")
            .push(CaseRecord {
                name: result.name.clone(),
                status,
                message,
                duration_micros: result.duration.as_micros() as u64,
            });
    }

    fn run_finished(&self, summary: &RunSummary) {
        let cases = self
            .cases
            .lock()
            .expect("JsonReporter mutex poisoned - a reporter write panicked");
        let record = RunRecord {
            cases: &cases,
            passed: summary.passed,
            failed: summary.failed,
            duration_micros: summary.duration.as_micros() as u64,
        };

        let mut writer = self
            .writer
            .lock()
            .expect("JsonReporter mutex poisoned - a reporter write panicked");
        let _ = serde_json::to_writer(&mut *writer, &record);
        let _ = writeln!(writer);
        let _ = writer.flush();
    }
}
