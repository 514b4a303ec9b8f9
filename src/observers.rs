//! Observers for reporting counters and workload measurements.
//!
//! - [`table`] - Pretty-print counters and measurements using the `tabled` crate
//! - [`json`] - Serialize counters and measurements to JSON
//!
//! # Feature Flags
//!
//! - `table` - Enables the [`table`] module
//! - `json` - Enables the [`json`] module
//! - `full` - Enables all observer modules
//!
//! # Example
//!
//! ```rust,ignore
//! use contatori_strategie::counters::Strategy;
//! use contatori_strategie::harness::Workload;
//! use contatori_strategie::observers::json::JsonObserver;
//! use contatori_strategie::observers::table::TableObserver;
//!
//! let workload = Workload::new().threads(8).reads_per_inc(10);
//! let results: Vec<_> = Strategy::ALL
//!     .iter()
//!     .map(|s| workload.run(s.build().as_ref()))
//!     .collect();
//!
//! println!("{}", TableObserver::new().render_measurements(&results));
//! println!("{}", JsonObserver::new().pretty(true).measurements_to_json(&results)?);
//! ```

#[cfg(feature = "json")]
mod error;

#[cfg(feature = "json")]
pub use error::{ObserverError, Result};

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;
