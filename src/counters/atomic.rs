//! Lock-free counter backed by a single atomic word.
//!
//! This module provides [`Atomic`], the cheapest strategy: increments are a
//! single `fetch_add` and reads a single `load`. Nothing ever blocks.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

use crate::counters::{Counter, Strategy};

/// A counter stored in one cache-padded [`AtomicU64`].
///
/// Usable straight from [`Atomic::new`] or [`Default`], including in a
/// `static`. Increments wrap on overflow.
///
/// # Examples
///
/// ```rust
/// use contatori_strategie::counters::atomic::Atomic;
/// use contatori_strategie::counters::Counter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(Atomic::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let c = Arc::clone(&counter);
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             c.inc();
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(counter.get(), 4000);
/// ```
pub struct Atomic {
    name: &'static str,
    value: CachePadded<AtomicU64>,
}

impl Atomic {
    /// Creates a new counter initialized to zero.
    pub const fn new() -> Self {
        Atomic {
            name: "",
            value: CachePadded::new(AtomicU64::new(0)),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    ///
    /// ```rust
    /// use contatori_strategie::counters::atomic::Atomic;
    /// use contatori_strategie::counters::Counter;
    ///
    /// static REQUESTS: Atomic = Atomic::new().with_name("requests");
    /// assert_eq!(REQUESTS.name(), "requests");
    /// ```
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for Atomic {
    #[inline]
    fn inc(&self) {
        // fetch_add wraps on overflow
        self.value.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn strategy(&self) -> Strategy {
        Strategy::Atomic
    }
}

impl Default for Atomic {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Atomic {
    /// Output format: `name{ value }`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.get())
    }
}
