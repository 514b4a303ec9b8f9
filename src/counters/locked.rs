//! Counter guarded by a reader/writer lock.
//!
//! [`Locked`] keeps a plain `u64` behind a [`parking_lot::RwLock`].
//! Increments take the exclusive lock; reads take the shared lock, so any
//! number of readers proceed in parallel while no writer is active.
//!
//! Guards are released when they go out of scope, on every exit path, and
//! `parking_lot` locks are never poisoned.

use std::fmt::Debug;

use parking_lot::RwLock;

use crate::counters::{Counter, Strategy};

/// A counter protected by a reader/writer lock.
///
/// Like [`Atomic`](crate::counters::atomic::Atomic), it needs no setup and
/// can live in a `static`.
///
/// # Examples
///
/// ```rust
/// use contatori_strategie::counters::locked::Locked;
/// use contatori_strategie::counters::Counter;
///
/// let counter = Locked::new().with_name("jobs");
/// counter.inc();
/// counter.inc();
/// assert_eq!(counter.get(), 2);
/// ```
pub struct Locked {
    name: &'static str,
    value: RwLock<u64>,
}

impl Locked {
    /// Creates a new counter initialized to zero.
    pub const fn new() -> Self {
        Locked {
            name: "",
            value: parking_lot::const_rwlock(0),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for Locked {
    fn inc(&self) {
        let mut value = self.value.write();
        *value = value.wrapping_add(1);
    }

    fn get(&self) -> u64 {
        *self.value.read()
    }

    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn strategy(&self) -> Strategy {
        Strategy::Locked
    }
}

impl Default for Locked {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Locked {
    /// Output format: `name{ value }`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new() {
        let counter = Locked::new();
        assert_eq!(counter.get(), 0);
        assert_eq!(counter.strategy(), Strategy::Locked);
    }

    #[test]
    fn test_inc() {
        let counter = Locked::default();
        counter.inc();
        counter.inc();
        counter.inc();
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_with_name_preserves_value() {
        let counter = Locked::new().with_name("test");
        counter.inc();
        assert_eq!(counter.name(), "test");
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_wraps_on_overflow() {
        let counter = Locked::new();
        *counter.value.write() = u64::MAX;
        counter.inc();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_readers_share_the_lock() {
        let counter = Locked::new();
        counter.inc();
        // a held read guard must not block another reader
        let guard = counter.value.read();
        assert_eq!(counter.get(), 1);
        drop(guard);
        counter.inc();
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_writers_and_readers() {
        let counter = Arc::new(Locked::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let c = Arc::clone(&counter);
            handles.push(thread::spawn(move || {
                let mut last = 0;
                for _ in 0..250 {
                    c.inc();
                    let now = c.get();
                    assert!(now >= last);
                    last = now;
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), 1000);
    }

    #[test]
    fn test_debug() {
        let counter = Locked::new().with_name("locked");
        counter.inc();
        assert_eq!(format!("{:?}", counter), "locked{ 1 }");
    }
}
