//! Named test cases.

use crate::application::context::TestContext;

/// A registered test case: a name plus the body to execute.
///
/// The body receives the per-case [`TestContext`] and signals failure by
/// panicking - `assert!`-family macros and mock divergences both do this,
/// and the runner turns the panic into a recorded failure.
pub struct TestCase {
    name: String,
    body: Box<dyn Fn(&TestContext)>,
}

impl TestCase {
    /// Create a case from a name and a body.
    pub fn new(name: impl Into<String>, body: impl Fn(&TestContext) + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    /// Name the case was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the body. Panics propagate to the caller.
    pub(crate) fn run(&self, ctx: &TestContext) {
        (self.body)(ctx);
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("body", &"<fn>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_runs_body() {
        use std::cell::Cell;
        use std::rc::Rc;

        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        let case = TestCase::new("marks_flag", move |_ctx| ran_clone.set(true));

        assert_eq!(case.name(), "marks_flag");
        case.run(&TestContext::new());
        assert!(ran.get());
    }

    #[test]
    fn test_debug_hides_body() {
        let case = TestCase::new("x", |_ctx| {});
        let rendered = format!("{:?}", case);
        assert!(rendered.contains("x"));
        assert!(rendered.contains("<fn>"));
    }
}
