//! Sample test binary: a tiny unit under test driven by the harness.
//!
//! The subject is a pure `foo` and a `malloc_wrapper` that delegates to
//! an allocator dependency. The allocator is mocked, so the wrapper can
//! be exercised without touching a real allocator.
//!
//! Run with `cargo run --example sample_suite`; the process exits 0 when
//! every test passed and 1 otherwise.

use mockunit::{MockFn, TestSuite};
use std::ptr::NonNull;

/// Allocator dependency of the unit under test.
trait Allocator {
    fn malloc(&self, size: usize) -> Option<NonNull<u8>>;
}

/// Test double wired to a mock handle.
struct MockedAllocator {
    malloc: MockFn<usize, Option<NonNull<u8>>>,
}

impl Allocator for MockedAllocator {
    fn malloc(&self, size: usize) -> Option<NonNull<u8>> {
        self.malloc.call(size)
    }
}

// --- Unit under test ---

fn foo(a: i32, b: i32) -> i32 {
    a + b
}

/// Calls the allocator exactly once and returns its result unmodified,
/// `None` included.
fn malloc_wrapper(alloc: &dyn Allocator, size: usize) -> Option<NonNull<u8>> {
    alloc.malloc(size)
}

fn main() {
    tracing_subscriber::fmt::init();

    let suite = TestSuite::builder("example")
        .case("foo_adds_small_integers", |_ctx| {
            assert_eq!(foo(1, 2), 3);
        })
        .case("foo_adds_negative_integers", |_ctx| {
            assert_eq!(foo(-4, 1), -3);
        })
        .case("malloc_wrapper_passes_null_through", |ctx| {
            let malloc = ctx.mock_fn("dependency_malloc");
            malloc.expect_and_return(10, None);

            let alloc = MockedAllocator {
                malloc: malloc.clone(),
            };
            let ptr = malloc_wrapper(&alloc, 10);
            assert!(ptr.is_none());
        })
        .build()
        .unwrap();

    let summary = suite.run();
    std::process::exit(summary.exit_code());
}
