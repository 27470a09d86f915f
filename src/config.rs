//! Engine configuration.

use std::time::Duration;

use crate::convert::DEFAULT_TASK_LABEL;

/// Tunables for the synchronization engine.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound on any single remote call, so a stalled transport cannot
    /// leave the view stuck in a loading state forever.
    pub remote_timeout: Duration,
    /// Label rendered for tasks the backend sent without a name.
    pub default_task_label: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_timeout: Duration::from_secs(30),
            default_task_label: DEFAULT_TASK_LABEL.to_owned(),
        }
    }
}
