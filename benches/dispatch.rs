use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mockunit::domain::expectation::ExpectationQueue;
use mockunit::{ConsoleReporter, TestContext, TestSuite};
use std::sync::Arc;

/// Benchmark raw expectation queue operations
fn bench_expectation_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("expectation_queue");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("expect_then_consume", |b| {
        b.iter(|| {
            let mut queue = ExpectationQueue::new("dep");
            for i in 0..1000usize {
                queue.expect(black_box(i), black_box(i));
            }
            for i in 0..1000usize {
                black_box(queue.consume(&i).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark mock dispatch through a context handle
fn bench_mock_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("mock_dispatch");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("expect_and_call", |b| {
        b.iter(|| {
            let ctx = TestContext::new();
            let mock = ctx.mock_fn::<usize, usize>("dep");
            for i in 0..1000 {
                mock.expect_and_return(black_box(i), black_box(i));
            }
            for i in 0..1000 {
                black_box(mock.call(i));
            }
        })
    });

    group.finish();
}

/// Benchmark whole-suite overhead for suites of different sizes
fn bench_suite_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("suite_overhead");

    for num_cases in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*num_cases as u64));

        group.bench_with_input(
            BenchmarkId::new("run", num_cases),
            num_cases,
            |b, &num_cases| {
                b.iter(|| {
                    let mut builder = TestSuite::builder("bench")
                        .with_reporter(Arc::new(ConsoleReporter::with_writer(std::io::sink())));
                    for i in 0..num_cases {
                        builder = builder.case(format!("case_{}", i), |_ctx| {});
                    }
                    let suite = builder.build().unwrap();
                    black_box(suite.run())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_expectation_queue,
    bench_mock_dispatch,
    bench_suite_overhead,
);
criterion_main!(benches);
