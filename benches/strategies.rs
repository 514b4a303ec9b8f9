use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use contatori_strategie::counters::{Counter, Strategy};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const NUM_THREADS: usize = 10;
const ITERATIONS_PER_THREAD: usize = 1_000;

/// One increment per iteration, single thread.
fn bench_sequential_inc(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_inc");

    for strategy in Strategy::ALL {
        let counter = strategy.build();
        group.bench_function(BenchmarkId::from_parameter(strategy), |b| {
            b.iter(|| counter.inc())
        });
        black_box(counter.get());
    }

    group.finish();
}

/// NUM_THREADS threads, each doing ITERATIONS_PER_THREAD increments followed
/// by `reads` reads.
fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");

    for reads in [0usize, 10] {
        for strategy in Strategy::ALL {
            group.bench_function(
                BenchmarkId::new(
                    format!("{strategy} {reads} reads"),
                    format!("{}threads x {}iter", NUM_THREADS, ITERATIONS_PER_THREAD),
                ),
                |b| {
                    b.iter(|| {
                        let counter: Arc<dyn Counter> = Arc::from(strategy.build());
                        let mut handles = vec![];

                        for _ in 0..NUM_THREADS {
                            let counter_clone = Arc::clone(&counter);
                            let handle = thread::spawn(move || {
                                let mut sum_reads = 0u64;
                                for _ in 0..ITERATIONS_PER_THREAD {
                                    counter_clone.inc();
                                    for _ in 0..reads {
                                        sum_reads = sum_reads.wrapping_add(counter_clone.get());
                                    }
                                }
                                sum_reads
                            });
                            handles.push(handle);
                        }

                        for handle in handles {
                            black_box(handle.join().unwrap());
                        }

                        let total = counter.get();
                        assert_eq!(total, (NUM_THREADS * ITERATIONS_PER_THREAD) as u64);
                        black_box(total)
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_sequential_inc, bench_contended);
criterion_main!(benches);
