//! Concurrent workloads for comparing counter strategies.
//!
//! A [`Workload`] hammers any [`Counter`] from several threads at once, each
//! thread doing a fixed number of increments with an optional number of reads
//! after every increment. The result is a [`Measurement`] carrying timing and
//! a consistency check: the final value must equal `threads × iterations`.
//!
//! # Examples
//!
//! ```rust
//! use contatori_strategie::counters::Strategy;
//! use contatori_strategie::harness::Workload;
//!
//! let workload = Workload::new().threads(4).iterations(100).reads_per_inc(2);
//!
//! for strategy in Strategy::ALL {
//!     let counter = strategy.build();
//!     let measurement = workload.run(counter.as_ref());
//!     assert!(measurement.is_consistent());
//!     assert_eq!(measurement.observed, 400);
//! }
//! ```

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::counters::{Counter, Strategy};

/// Shape of a concurrent workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    threads: usize,
    iterations: usize,
    reads_per_inc: usize,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            threads: 10,
            iterations: 1000,
            reads_per_inc: 0,
        }
    }
}

impl Workload {
    /// Creates a workload of 10 threads × 1000 increments with no reads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of concurrent threads.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the number of increments each thread performs.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets how many times each thread calls `get()` after every increment.
    pub fn reads_per_inc(mut self, reads: usize) -> Self {
        self.reads_per_inc = reads;
        self
    }

    /// Value a fresh counter must hold once the workload completes.
    pub fn expected(&self) -> u64 {
        (self.threads as u64).wrapping_mul(self.iterations as u64)
    }

    /// Runs the workload against `counter` and measures it.
    ///
    /// The counter is expected to start at zero; `observed` is its value
    /// after every thread has finished.
    pub fn run(&self, counter: &dyn Counter) -> Measurement {
        let start = Instant::now();

        thread::scope(|scope| {
            for _ in 0..self.threads {
                scope.spawn(|| {
                    let mut sum_reads = 0u64;
                    for _ in 0..self.iterations {
                        counter.inc();
                        for _ in 0..self.reads_per_inc {
                            sum_reads = sum_reads.wrapping_add(counter.get());
                        }
                    }
                    black_box(sum_reads);
                });
            }
        });

        let elapsed = start.elapsed();
        let measurement = Measurement {
            strategy: counter.strategy(),
            name: counter.name().to_string(),
            threads: self.threads,
            iterations: self.iterations,
            reads_per_inc: self.reads_per_inc,
            expected: self.expected(),
            observed: counter.get(),
            elapsed,
        };

        info!(
            strategy = %measurement.strategy,
            threads = measurement.threads,
            iterations = measurement.iterations,
            reads_per_inc = measurement.reads_per_inc,
            observed = measurement.observed,
            elapsed_us = elapsed.as_micros() as u64,
            "workload finished"
        );

        measurement
    }
}

/// Outcome of one [`Workload::run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Strategy of the measured counter.
    pub strategy: Strategy,
    /// Name of the measured counter (may be empty).
    pub name: String,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Increments per thread.
    pub iterations: usize,
    /// Reads after every increment.
    pub reads_per_inc: usize,
    /// Value the counter should hold at the end.
    pub expected: u64,
    /// Value the counter actually held at the end.
    pub observed: u64,
    /// Wall-clock time of the whole run.
    #[cfg_attr(feature = "serde", serde(with = "nanos"))]
    pub elapsed: Duration,
}

impl Measurement {
    /// Returns `true` if no increment was lost or duplicated.
    pub fn is_consistent(&self) -> bool {
        self.expected == self.observed
    }

    /// Total counter operations (increments and reads) performed, saturating
    /// at `u64::MAX`.
    pub fn operations(&self) -> u64 {
        let per_inc = (self.reads_per_inc as u64).saturating_add(1);
        (self.iterations as u64)
            .saturating_mul(per_inc)
            .saturating_mul(self.threads as u64)
    }

    /// Operations per second over the whole run.
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.operations() as f64 / secs
    }
}

/// Serializes a [`Duration`] as integer nanoseconds.
#[cfg(feature = "serde")]
mod nanos {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_nanos() as u64).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::actor::Actor;
    use crate::counters::atomic::Atomic;
    use crate::counters::locked::Locked;

    #[test]
    fn test_defaults() {
        let workload = Workload::new();
        assert_eq!(workload.expected(), 10_000);
    }

    #[test]
    fn test_run_atomic() {
        let counter = Atomic::new().with_name("atomic");
        let m = Workload::new().run(&counter);
        assert_eq!(m.strategy, Strategy::Atomic);
        assert_eq!(m.name, "atomic");
        assert_eq!(m.observed, 10_000);
        assert!(m.is_consistent());
    }

    #[test]
    fn test_run_locked_with_reads() {
        let counter = Locked::new();
        let m = Workload::new()
            .threads(4)
            .iterations(200)
            .reads_per_inc(10)
            .run(&counter);
        assert!(m.is_consistent());
        assert_eq!(m.operations(), 4 * 200 * 11);
    }

    #[test]
    fn test_run_actor() {
        let counter = Actor::new();
        let m = Workload::new().threads(10).iterations(1000).run(&counter);
        assert_eq!(m.observed, 10_000);
        assert!(m.is_consistent());
    }

    #[test]
    fn test_inconsistent_when_counter_not_fresh() {
        let counter = Atomic::new();
        counter.inc();
        let m = Workload::new().threads(2).iterations(5).run(&counter);
        assert_eq!(m.observed, 11);
        assert!(!m.is_consistent());
    }

    #[test]
    fn test_zero_threads() {
        let counter = Locked::new();
        let m = Workload::new().threads(0).run(&counter);
        assert_eq!(m.expected, 0);
        assert!(m.is_consistent());
    }

    #[test]
    fn test_ops_per_sec_zero_elapsed() {
        let m = Measurement {
            strategy: Strategy::Atomic,
            name: String::new(),
            threads: 1,
            iterations: 1,
            reads_per_inc: 0,
            expected: 1,
            observed: 1,
            elapsed: Duration::ZERO,
        };
        assert_eq!(m.ops_per_sec(), 0.0);
    }

    #[test]
    fn test_operations_saturate() {
        let m = Measurement {
            strategy: Strategy::Atomic,
            name: String::new(),
            threads: usize::MAX,
            iterations: usize::MAX,
            reads_per_inc: usize::MAX,
            expected: 0,
            observed: 0,
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(m.operations(), u64::MAX);
        assert!(m.ops_per_sec() > 0.0);
    }

    #[test]
    fn test_ops_per_sec() {
        let m = Measurement {
            strategy: Strategy::Locked,
            name: String::new(),
            threads: 2,
            iterations: 50,
            reads_per_inc: 1,
            expected: 100,
            observed: 100,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(m.operations(), 200);
        assert_eq!(m.ops_per_sec(), 100.0);
    }
}
