//! # Contatori Strategie - One Counter Contract, Three Concurrency Strategies
//!
//! A Rust library exposing a single concurrency-safe monotonic counter
//! contract, [`Counter`](counters::Counter) (`inc()` and `get()`), implemented
//! three different ways so that the cost of each synchronization technique can
//! be compared under the same workload.
//!
//! ## The Strategies
//!
//! | Type | Technique | Setup | Blocking |
//! |------|-----------|-------|----------|
//! | [`Atomic`](counters::atomic::Atomic) | Hardware `fetch_add` / `load` on one word | none (`const fn new`) | never |
//! | [`Locked`](counters::locked::Locked) | `u64` behind a reader/writer lock | none (`const fn new`) | writers exclude everyone, readers share |
//! | [`Actor`](counters::actor::Actor) | `u64` owned by a worker thread, reached through rendezvous channels | [`Actor::new`](counters::actor::Actor::new) starts the worker | every call waits for the worker |
//!
//! All three are `Send + Sync`, start at zero, never lose or duplicate an
//! increment under concurrency, and wrap around on `u64` overflow.
//!
//! ### The Actor Strategy
//!
//! The actor is the odd one out: its value is a local variable of a worker
//! loop and no other thread ever touches it. Writes and reads share one
//! request queue, handled one message per loop iteration:
//!
//! ```text
//!   caller                           worker
//!   ──────                           ──────
//!   inc()  ── Delta(+1) ───────►  ┐
//!   dec()  ── Delta(-1) ───────►  ├─ recv ─► count += 1 / count -= 1 (floor at 0)
//!   get()  ── Read(reply) ─────►  ┘          (or reply with a copy of count)
//! ```
//!
//! Because the request channel has zero capacity, every call is a synchronous
//! handoff with the single worker, which serializes all operations without a
//! lock, and a `get()` always sees every increment that returned before it.
//! An `Actor` obtained through `Default` has no worker: using it fails fast
//! with [`CounterError::Uninitialized`](error::CounterError::Uninitialized)
//! rather than hanging.
//!
//! ## Quick Start
//!
//! ```rust
//! use contatori_strategie::counters::actor::Actor;
//! use contatori_strategie::counters::atomic::Atomic;
//! use contatori_strategie::counters::locked::Locked;
//! use contatori_strategie::counters::Counter;
//!
//! let counters: Vec<Box<dyn Counter>> = vec![
//!     Box::new(Atomic::new()),
//!     Box::new(Locked::new()),
//!     Box::new(Actor::new()),
//! ];
//!
//! for counter in &counters {
//!     counter.inc();
//!     counter.inc();
//!     counter.inc();
//!     assert_eq!(counter.get(), 3);
//! }
//! ```
//!
//! ## Measuring
//!
//! The [`harness`] module drives any counter from many threads with a chosen
//! read/write ratio and reports a [`Measurement`](harness::Measurement):
//!
//! ```rust
//! use contatori_strategie::counters::Strategy;
//! use contatori_strategie::harness::Workload;
//!
//! let workload = Workload::new().threads(10).iterations(1000).reads_per_inc(1);
//!
//! for strategy in Strategy::ALL {
//!     let m = workload.run(strategy.build().as_ref());
//!     assert_eq!(m.observed, 10_000);
//! }
//! ```
//!
//! Criterion benchmarks for the same scenarios live in `benches/strategies.rs`.
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (worker lifecycle at `debug`,
//! finished workloads at `info`) and never installs a subscriber itself.
//!
//! ## Observers
//!
//! Optional observer modules render counters and measurements. Each is gated
//! behind a feature flag:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`observers::table`] | Pretty-print as ASCII tables |
//! | `json` | [`observers::json`] | Serialize to JSON |
//! | `serde` | [`snapshot`] | Serializable snapshot types |
//! | `full` | All observers | Enables all observer modules |
//!
//! ```rust,ignore
//! use contatori_strategie::observers::table::TableObserver;
//!
//! println!("{}", TableObserver::new().render_measurements(&results));
//! ```

pub mod counters;
pub mod error;
pub mod harness;
pub mod observers;

#[cfg(feature = "serde")]
pub mod snapshot;
