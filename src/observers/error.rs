//! Unified error type for all observers.
//!
//! Observers that can fail return [`Result`], so client code keeps a single
//! error type when switching output formats. Table rendering never fails.

use thiserror::Error;

/// Unified error type for all observer operations.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Error from the JSON observer.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for observer operations.
pub type Result<T> = std::result::Result<T, ObserverError>;
