//! Counter whose state lives inside a dedicated worker thread.
//!
//! This module provides [`Actor`]. The counter value is a local variable of
//! the worker loop and is never shared: callers reach it only through one
//! rendezvous request channel.
//!
//! ```text
//!   inc() / dec() ── Request::Delta(±1) ──►  ┌───────────────────────┐
//!                                            │ worker thread         │
//!   get() ──────── Request::Read(reply) ──►  │   let mut count = 0;  │
//!         ◄──────── u64 count ─── reply ───  │   loop { recv }       │
//!                                            └───────────────────────┘
//! ```
//!
//! Writes and reads travel on the same queue, so the worker handles them in
//! the order they were handed over and exactly one message touches `count`
//! at a time, without any lock. A read is answered from inside the worker
//! with the value current at that point, so it always reflects every write
//! accepted before it.
//!
//! # Construction
//!
//! Unlike the other strategies, an `Actor` must be built with [`Actor::new`]
//! (or [`Actor::try_spawn`]). [`Actor::default`] yields an unconstructed
//! counter with no channel: every operation on it fails immediately with
//! [`CounterError::Uninitialized`] instead of blocking.
//!
//! # Shutdown
//!
//! The worker runs until the `Actor` is dropped. Dropping it closes the
//! request channel, the worker observes the disconnect and exits.

use std::fmt::Debug;
use std::thread;

use flume::{Receiver, Sender};
use tracing::debug;

use crate::counters::{Counter, Strategy};
use crate::error::{CounterError, Result};

/// A message for the worker.
enum Request {
    /// Apply a signed delta with the floor-at-zero policy.
    Delta(i64),
    /// Send the current value back on the enclosed reply channel.
    Read(Sender<u64>),
}

/// A counter owned by a worker thread and reached through channels.
///
/// In addition to the [`Counter`] contract, `Actor` supports [`Actor::dec`],
/// which never takes the value below zero.
///
/// # Examples
///
/// ```rust
/// use contatori_strategie::counters::actor::Actor;
/// use contatori_strategie::counters::Counter;
///
/// let counter = Actor::new().with_name("sessions");
/// counter.inc();
/// counter.inc();
/// counter.dec();
/// assert_eq!(counter.get(), 1);
///
/// counter.dec();
/// counter.dec(); // already zero: no-op
/// assert_eq!(counter.get(), 0);
/// ```
///
/// Using an unconstructed counter fails fast:
///
/// ```rust
/// use contatori_strategie::counters::actor::Actor;
/// use contatori_strategie::error::CounterError;
///
/// let counter = Actor::default();
/// assert!(matches!(counter.try_get(), Err(CounterError::Uninitialized)));
/// ```
#[derive(Default)]
pub struct Actor {
    name: &'static str,
    requests: Option<Sender<Request>>,
}

impl Actor {
    /// Allocates the request channel and starts the worker thread.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to spawn the worker thread.
    /// Use [`Actor::try_spawn`] to handle that case.
    pub fn new() -> Self {
        Self::try_spawn().unwrap_or_else(|err| panic!("{err}"))
    }

    /// Allocates the request channel and starts the worker thread, reporting
    /// spawn failures as [`CounterError::Spawn`].
    pub fn try_spawn() -> Result<Self> {
        let (requests, inbox) = flume::bounded(0);

        thread::Builder::new()
            .name("counter-actor".into())
            .spawn(move || serve(inbox))?;

        Ok(Actor {
            name: "",
            requests: Some(requests),
        })
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    /// Returns `true` if this counter was built with a constructor.
    pub fn is_initialized(&self) -> bool {
        self.requests.is_some()
    }

    /// Decrements the counter by one, stopping at zero.
    ///
    /// # Panics
    ///
    /// Panics if the counter was not constructed with [`Actor::new`].
    pub fn dec(&self) {
        fail_fast(self.try_dec())
    }

    /// Hands `+1` to the worker, blocking until it is accepted.
    pub fn try_inc(&self) -> Result<()> {
        self.send(Request::Delta(1))
    }

    /// Hands `-1` to the worker, blocking until it is accepted.
    pub fn try_dec(&self) -> Result<()> {
        self.send(Request::Delta(-1))
    }

    /// Asks the worker for the current value and waits for the answer.
    pub fn try_get(&self) -> Result<u64> {
        let (reply, answer) = flume::bounded(1);
        self.send(Request::Read(reply))?;
        answer.recv().map_err(|_| CounterError::Disconnected)
    }

    fn send(&self, request: Request) -> Result<()> {
        self.requests
            .as_ref()
            .ok_or(CounterError::Uninitialized)?
            .send(request)
            .map_err(|_| CounterError::Disconnected)
    }
}

impl Counter for Actor {
    /// # Panics
    ///
    /// Panics if the counter was not constructed with [`Actor::new`].
    fn inc(&self) {
        fail_fast(self.try_inc())
    }

    /// # Panics
    ///
    /// Panics if the counter was not constructed with [`Actor::new`].
    fn get(&self) -> u64 {
        fail_fast(self.try_get())
    }

    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn strategy(&self) -> Strategy {
        Strategy::Actor
    }
}

impl Debug for Actor {
    /// Output format: `name{ value }`, or `name{ uninitialized }`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.try_get() {
            Ok(value) => write!(f, "{}{{ {} }}", self.name, value),
            Err(_) => write!(f, "{}{{ uninitialized }}", self.name),
        }
    }
}

fn fail_fast<T>(result: Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

/// Worker loop. `count` is local to this function and never leaves it
/// except as a copy sent back to a reader.
fn serve(inbox: Receiver<Request>) {
    let mut count: u64 = 0;
    debug!("counter worker started");

    // recv fails once every sender is gone
    while let Ok(request) = inbox.recv() {
        match request {
            Request::Delta(delta) => count = apply(count, delta),
            // the reader is blocked on the other end, a failed send means it is gone
            Request::Read(reply) => {
                let _ = reply.send(count);
            }
        }
    }

    debug!(count, "counter worker stopped");
}

/// Applies a delta with the floor-at-zero policy.
fn apply(count: u64, delta: i64) -> u64 {
    if delta < 0 && count > 0 {
        count - 1
    } else if delta > 0 {
        count.wrapping_add(1)
    } else {
        count
    }
}
