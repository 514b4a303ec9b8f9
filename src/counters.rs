//! The counter contract and its three strategies.
//!
//! Every strategy implements [`Counter`], so callers can swap one for another
//! without any change in observable behavior other than performance:
//!
//! ```text
//!                    ┌──────────────────────────┐
//!                    │    trait Counter         │
//!                    │  inc()        get()      │
//!                    └────────────┬─────────────┘
//!            ┌────────────────────┼─────────────────────┐
//!            ▼                    ▼                     ▼
//!   ┌─────────────────┐  ┌─────────────────┐  ┌──────────────────────┐
//!   │ Atomic          │  │ Locked          │  │ Actor                │
//!   │ fetch_add/load  │  │ RwLock<u64>     │  │ worker thread owns   │
//!   │ never blocks    │  │ write / read    │  │ count; rendezvous    │
//!   │                 │  │ guards          │  │ channels only        │
//!   └─────────────────┘  └─────────────────┘  └──────────────────────┘
//! ```
//!
//! # Overflow
//!
//! All strategies wrap around on `u64` overflow. None of them panics or
//! saturates.

pub mod actor;
pub mod atomic;
pub mod locked;

use std::fmt::{Debug, Display};

/// A concurrency-safe monotonic counter.
///
/// # Examples
///
/// ```rust
/// use contatori_strategie::counters::atomic::Atomic;
/// use contatori_strategie::counters::Counter;
///
/// fn bump(counter: &dyn Counter, times: usize) {
///     for _ in 0..times {
///         counter.inc();
///     }
/// }
///
/// let counter = Atomic::new();
/// bump(&counter, 3);
/// assert_eq!(counter.get(), 3);
/// ```
pub trait Counter: Debug + Send + Sync {
    /// Increments the counter by exactly one.
    fn inc(&self);

    /// Returns the current value.
    fn get(&self) -> u64;

    /// Returns the label set with `with_name()`, or an empty string.
    fn name(&self) -> &str;

    /// Returns which strategy backs this counter.
    fn strategy(&self) -> Strategy;
}

impl Display for dyn Counter + '_ {
    /// Formats the counter as `name:value` if named, or just `value` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.name().is_empty() {
            write!(f, "{}:{}", self.name(), self.get())
        } else {
            write!(f, "{}", self.get())
        }
    }
}

/// Identifies one of the counter strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Lock-free, hardware atomic operations.
    Atomic,
    /// Reader/writer lock around a plain integer.
    Locked,
    /// State owned by a worker thread, reached through channels.
    Actor,
}

impl Strategy {
    /// All strategies, in order of increasing implementation complexity.
    pub const ALL: [Strategy; 3] = [Strategy::Atomic, Strategy::Locked, Strategy::Actor];

    /// Returns the lowercase name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Atomic => "atomic",
            Strategy::Locked => "locked",
            Strategy::Actor => "actor",
        }
    }

    /// Builds a ready-to-use counter of this strategy.
    ///
    /// For [`Strategy::Actor`] this starts the worker thread.
    ///
    /// ```rust
    /// use contatori_strategie::counters::Strategy;
    ///
    /// for strategy in Strategy::ALL {
    ///     let counter = strategy.build();
    ///     counter.inc();
    ///     assert_eq!(counter.get(), 1);
    ///     assert_eq!(counter.strategy(), strategy);
    /// }
    /// ```
    pub fn build(self) -> Box<dyn Counter> {
        match self {
            Strategy::Atomic => Box::new(atomic::Atomic::new()),
            Strategy::Locked => Box::new(locked::Locked::new()),
            Strategy::Actor => Box::new(actor::Actor::new()),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn all() -> Vec<Arc<dyn Counter>> {
        Strategy::ALL
            .iter()
            .map(|s| Arc::from(s.build()))
            .collect()
    }

    #[test]
    fn test_fresh_counter_is_zero() {
        for counter in all() {
            assert_eq!(counter.get(), 0, "{}", counter.strategy());
        }
    }

    #[test]
    fn test_three_increments() {
        for counter in all() {
            counter.inc();
            counter.inc();
            counter.inc();
            assert_eq!(counter.get(), 3, "{}", counter.strategy());
            // reading does not disturb the value
            assert_eq!(counter.get(), 3, "{}", counter.strategy());
        }
    }

    #[test]
    fn test_repeated_get_is_stable() {
        for counter in all() {
            counter.inc();
            let first = counter.get();
            for _ in 0..10 {
                assert_eq!(counter.get(), first);
            }
        }
    }

    #[test]
    fn test_concurrent_increments() {
        const THREADS: u64 = 10;
        const ITERATIONS: u64 = 1000;

        for counter in all() {
            let mut handles = vec![];
            for _ in 0..THREADS {
                let c = Arc::clone(&counter);
                handles.push(thread::spawn(move || {
                    for _ in 0..ITERATIONS {
                        c.inc();
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(counter.get(), THREADS * ITERATIONS, "{}", counter.strategy());
        }
    }

    #[test]
    fn test_reads_never_go_back() {
        const THREADS: u64 = 8;
        const ITERATIONS: u64 = 2000;

        for counter in all() {
            let mut handles = vec![];
            for _ in 0..THREADS {
                let c = Arc::clone(&counter);
                handles.push(thread::spawn(move || {
                    let mut last = 0;
                    for own in 1..=ITERATIONS {
                        c.inc();
                        let v = c.get();
                        assert!(v >= own, "{}: read {v} after {own} own increments", c.strategy());
                        assert!(v >= last, "{}: read {v} after reading {last}", c.strategy());
                        last = v;
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(counter.get(), THREADS * ITERATIONS, "{}", counter.strategy());
        }
    }

    #[test]
    fn test_strategies_agree() {
        let counters = all();
        for k in 0..25 {
            for counter in &counters {
                counter.inc();
            }
            let values: Vec<u64> = counters.iter().map(|c| c.get()).collect();
            assert!(values.iter().all(|v| *v == k + 1), "{values:?}");
        }
    }

    #[test]
    fn test_build_reports_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.build().strategy(), strategy);
        }
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Atomic.as_str(), "atomic");
        assert_eq!(Strategy::Locked.to_string(), "locked");
        assert_eq!(format!("{}", Strategy::Actor), "actor");
    }

    #[test]
    fn test_dyn_display() {
        let named = atomic::Atomic::new().with_name("hits");
        named.inc();
        named.inc();
        assert_eq!(format!("{}", &named as &dyn Counter), "hits:2");

        let unnamed = locked::Locked::new();
        unnamed.inc();
        assert_eq!(format!("{}", &unnamed as &dyn Counter), "1");
    }
}
