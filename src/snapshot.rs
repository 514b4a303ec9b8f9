//! Snapshot types for serializing counter state.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! contatori-strategie = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contatori_strategie::counters::atomic::Atomic;
//! use contatori_strategie::counters::Counter;
//! use contatori_strategie::snapshot::CounterSnapshot;
//!
//! let counter = Atomic::new().with_name("requests");
//! counter.inc();
//!
//! let snapshot = CounterSnapshot::from_counter(&counter);
//! let json = serde_json::to_string(&snapshot).unwrap();
//! assert_eq!(json, r#"{"name":"requests","strategy":"atomic","value":1}"#);
//! ```

use crate::counters::{Counter, Strategy};
use serde::{Deserialize, Serialize};

/// A point-in-time view of a single counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// The name of the counter, `(unnamed)` if it has none.
    pub name: String,
    /// The strategy backing the counter.
    pub strategy: Strategy,
    /// The value read from the counter.
    pub value: u64,
}

impl CounterSnapshot {
    /// Creates a new counter snapshot.
    pub fn new(name: impl Into<String>, strategy: Strategy, value: u64) -> Self {
        Self {
            name: name.into(),
            strategy,
            value,
        }
    }

    /// Reads `counter` and captures its state.
    pub fn from_counter(counter: &dyn Counter) -> Self {
        Self {
            name: if counter.name().is_empty() {
                "(unnamed)".to_string()
            } else {
                counter.name().to_string()
            },
            strategy: counter.strategy(),
            value: counter.get(),
        }
    }
}

/// A collection of counter snapshots taken together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountersSnapshot {
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// The counter snapshots.
    pub counters: Vec<CounterSnapshot>,
}

impl CountersSnapshot {
    /// Creates a new snapshot with the given counters.
    pub fn new(counters: Vec<CounterSnapshot>) -> Self {
        Self {
            timestamp_ms: None,
            counters,
        }
    }

    /// Creates a new snapshot with counters and a timestamp.
    pub fn with_timestamp(counters: Vec<CounterSnapshot>, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            counters,
        }
    }

    /// Finds a counter by name.
    pub fn get(&self, name: &str) -> Option<&CounterSnapshot> {
        self.counters.iter().find(|c| c.name == name)
    }

    /// Reads every counter in the iterator.
    pub fn collect<'a>(counters: impl Iterator<Item = &'a dyn Counter>) -> Self {
        Self::new(counters.map(CounterSnapshot::from_counter).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::actor::Actor;
    use crate::counters::atomic::Atomic;
    use crate::counters::locked::Locked;

    #[test]
    fn test_from_counter() {
        let counter = Locked::new().with_name("jobs");
        counter.inc();
        counter.inc();
        let snapshot = CounterSnapshot::from_counter(&counter);
        assert_eq!(snapshot, CounterSnapshot::new("jobs", Strategy::Locked, 2));
    }

    #[test]
    fn test_unnamed() {
        let counter = Atomic::new();
        assert_eq!(CounterSnapshot::from_counter(&counter).name, "(unnamed)");
    }

    #[test]
    fn test_collect_and_get() {
        let a = Atomic::new().with_name("a");
        let b = Actor::new().with_name("b");
        b.inc();

        let counters: Vec<&dyn Counter> = vec![&a, &b];
        let snapshot = CountersSnapshot::collect(counters.into_iter());

        assert_eq!(snapshot.counters.len(), 2);
        assert_eq!(snapshot.get("b").map(|s| s.value), Some(1));
        assert_eq!(snapshot.get("b").map(|s| s.strategy), Some(Strategy::Actor));
        assert!(snapshot.get("missing").is_none());
        assert!(snapshot.timestamp_ms.is_none());
    }

    #[test]
    fn test_with_timestamp() {
        let snapshot = CountersSnapshot::with_timestamp(vec![], 1234);
        assert_eq!(snapshot.timestamp_ms, Some(1234));
    }
}
