//! Error types for the synchronization layer.
//!
//! Converter-level problems (unparseable dates, missing fields) are absorbed
//! with defaults and never become errors; only synchronizer-level remote
//! calls produce a [`SyncError`], which the engine surfaces to the user
//! while keeping the last successfully rendered tree.

use std::time::Duration;
use thiserror::Error;

/// Convenience alias for synchronizer-level results.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised while replaying a local mutation against the backend.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The server refused the change for a business-rule reason. The message
    /// is user-visible and the local state is reverted; the change is not
    /// retried.
    #[error("change rejected: {0}")]
    ValidationRejected(String),
    /// Network or HTTP failure from the transport. Local state is left as
    /// last-known-good; the user must re-trigger the action.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A widget event referenced a task the widget no longer knows.
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// A remote call did not resolve within the configured limit.
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),
}

impl SyncError {
    /// Whether the error carries a message meant for the end user rather
    /// than the log.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, SyncError::ValidationRejected(_))
    }
}
