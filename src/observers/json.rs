//! JSON observer for serializing counters and measurements.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! contatori-strategie = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contatori_strategie::counters::atomic::Atomic;
//! use contatori_strategie::counters::Counter;
//! use contatori_strategie::observers::json::JsonObserver;
//!
//! let hits = Atomic::new().with_name("hits");
//! hits.inc();
//!
//! let counters: Vec<&dyn Counter> = vec![&hits];
//! let json = JsonObserver::new().to_json(counters.into_iter())?;
//! // [{"name":"hits","strategy":"atomic","value":1}]
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::counters::Counter;
use crate::harness::Measurement;
use crate::observers::Result;
use crate::snapshot::{CounterSnapshot, CountersSnapshot};

/// Configuration for the JSON observer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a timestamp in the output.
    pub include_timestamp: bool,
    /// Whether to wrap counters in a [`CountersSnapshot`] object.
    pub wrap_in_snapshot: bool,
}

/// An observer that serializes counters and measurements to JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a new JSON observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    ///
    /// Only has effect when `wrap_in_snapshot` is also enabled.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Enables or disables wrapping the output in a [`CountersSnapshot`].
    pub fn wrap_in_snapshot(mut self, enabled: bool) -> Self {
        self.config.wrap_in_snapshot = enabled;
        self
    }

    /// Serializes counters to a JSON string.
    pub fn to_json<'a>(&self, counters: impl Iterator<Item = &'a dyn Counter>) -> Result<String> {
        let snapshots: Vec<CounterSnapshot> = counters.map(CounterSnapshot::from_counter).collect();

        if self.config.wrap_in_snapshot {
            let snapshot = if self.config.include_timestamp {
                CountersSnapshot::with_timestamp(snapshots, current_timestamp_ms())
            } else {
                CountersSnapshot::new(snapshots)
            };
            self.serialize(&snapshot)
        } else {
            self.serialize(&snapshots)
        }
    }

    /// Serializes workload measurements to a JSON array.
    pub fn measurements_to_json(&self, measurements: &[Measurement]) -> Result<String> {
        self.serialize(measurements)
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// Returns the current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
