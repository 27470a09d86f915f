//! Remote service contracts.
//!
//! These traits mirror the backend's REST surface; the HTTP transport (with
//! its auth-header injection) lives outside this crate and implements them.
//! Tests drive the engine through recording fakes of the same traits.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncResult;
use crate::model::backend::{CreatedTask, DependencyDto, TaskDto};
use crate::model::role::Role;

/// Response of the dedicated status endpoint. A refusal carries the
/// server-side business-rule reason to show the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Project-level operations.
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Fetch the authoritative project tree. Returned as raw JSON because
    /// the converter, not the transport, owns tolerance for the payload's
    /// historical shape variants.
    async fn get_project(&self, project_id: &str) -> SyncResult<Value>;

    async fn add_member(&self, project_id: &str, user_id: &str) -> SyncResult<()>;
    async fn remove_member(&self, project_id: &str, user_id: &str) -> SyncResult<()>;
    async fn change_role(&self, project_id: &str, member_id: &str, role: Role) -> SyncResult<()>;
}

/// Task-level operations.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create_task(&self, dto: &TaskDto) -> SyncResult<CreatedTask>;
    async fn update_task(&self, task_id: &str, dto: &TaskDto) -> SyncResult<()>;
    async fn delete_task(&self, task_id: &str) -> SyncResult<()>;

    /// Dedicated completion endpoint; may refuse on business rules (e.g. a
    /// task with incomplete prerequisites cannot be marked complete).
    async fn set_status(&self, task_id: &str, completed: bool) -> SyncResult<StatusOutcome>;

    /// Dependency edges are owned by their target (child) task; the same
    /// `owner_task_id` convention applies to removal.
    async fn add_dependency(&self, owner_task_id: &str, dep: &DependencyDto) -> SyncResult<()>;
    async fn remove_dependency(&self, owner_task_id: &str, dep: &DependencyDto) -> SyncResult<()>;

    async fn add_performer(&self, task_id: &str, user_id: &str) -> SyncResult<()>;
    async fn remove_performer(&self, task_id: &str, user_id: &str) -> SyncResult<()>;
}
