//! Error type for counter operations.
//!
//! Only the [`Actor`](crate::counters::actor::Actor) strategy can fail: the
//! atomic and locked counters have no error paths at all. The actor exposes
//! `try_*` methods returning [`Result`], while the [`Counter`](crate::counters::Counter)
//! contract methods turn an error into an immediate panic.

use thiserror::Error;

/// Errors raised by counter strategies.
#[derive(Debug, Error)]
pub enum CounterError {
    /// The counter was obtained without its constructor, so it owns no
    /// channels and no worker.
    #[error("uninitialized counter, requires explicit construction (Actor::new)")]
    Uninitialized,

    /// The worker thread could not be started.
    #[error("failed to spawn counter worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker stopped before accepting or answering a request.
    ///
    /// The worker only exits once the owning [`Actor`](crate::counters::actor::Actor)
    /// has dropped its request channel, so a live `Actor` never reports this.
    #[error("counter worker disconnected")]
    Disconnected,
}

/// Result type for counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;
