//! Backend payload shapes.
//!
//! Several generations of the backend emitted the same entities under
//! diverging spellings (`startDate` / `startTime` / `StartTime` /
//! `start_date`, …). The inbound `Raw*` structs accept every observed
//! variant through `serde` aliases and default every field, so a malformed
//! task degrades instead of failing the whole payload. Outbound DTOs
//! serialize the one canonical camelCase spelling.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend ids arrive as JSON strings or numbers; normalize both to text.
pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// Project payload as returned by `getProject`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(default, alias = "Id", deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "CreatorId", deserialize_with = "opt_id")]
    pub creator_id: Option<String>,
    #[serde(default, alias = "RootTask")]
    pub root_task: Option<Value>,
    #[serde(default, alias = "Tasks")]
    pub tasks: Vec<Value>,
    /// Some payload generations carry the task list under `data` instead of
    /// (or in addition to) `tasks`; both are merged.
    #[serde(default, alias = "Data")]
    pub data: Vec<Value>,
    #[serde(default, alias = "Links")]
    pub links: Vec<Value>,
    #[serde(default, alias = "Members", alias = "users", alias = "Users")]
    pub members: Vec<Value>,
    #[serde(default, alias = "InviteCodes")]
    pub invite_codes: Vec<String>,
}

impl RawProject {
    /// Lenient parse: an unusable payload yields an empty project rather
    /// than an error, keeping the view renderable.
    pub fn from_payload(payload: &Value) -> RawProject {
        match serde_json::from_value(payload.clone()) {
            Ok(project) => project,
            Err(err) => {
                tracing::warn!(error = %err, "unusable project payload, rendering empty tree");
                RawProject::default()
            }
        }
    }

    /// Root task plus both task-list spellings, in one flat list.
    pub fn merged_tasks(&self) -> Vec<RawTask> {
        self.root_task
            .iter()
            .chain(self.tasks.iter())
            .chain(self.data.iter())
            .filter_map(RawTask::from_value_lenient)
            .collect()
    }
}

/// One task inside a project payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default, alias = "Id", deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default, alias = "Name", alias = "text", alias = "Text")]
    pub name: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "IsCompleted")]
    pub is_completed: Option<bool>,
    /// Only honored when numeric, as older payloads carried junk here.
    #[serde(default, alias = "Progress")]
    pub progress: Option<Value>,
    #[serde(
        default,
        alias = "StartTime",
        alias = "startDate",
        alias = "StartDate",
        alias = "start_date"
    )]
    pub start_time: Option<String>,
    #[serde(
        default,
        alias = "EndTime",
        alias = "endDate",
        alias = "EndDate",
        alias = "end_date"
    )]
    pub end_time: Option<String>,
    #[serde(
        default,
        alias = "ParentId",
        alias = "parentTaskId",
        alias = "ParentTaskId",
        alias = "parent",
        deserialize_with = "opt_id"
    )]
    pub parent_id: Option<String>,
    #[serde(default, alias = "Dependencies")]
    pub dependencies: Vec<Value>,
    #[serde(default, alias = "Performers", alias = "performerIds")]
    pub performers: Vec<Value>,
}

impl RawTask {
    pub fn from_value_lenient(value: &Value) -> Option<RawTask> {
        match serde_json::from_value(value.clone()) {
            Ok(task) => Some(task),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unparseable task");
                None
            }
        }
    }

    /// Explicit numeric progress, if any.
    pub fn numeric_progress(&self) -> Option<f64> {
        self.progress.as_ref().and_then(Value::as_f64)
    }

    /// Performer ids, whether the payload carries bare ids or user objects.
    pub fn performer_ids(&self) -> Vec<String> {
        self.performers
            .iter()
            .filter_map(|entry| {
                id_from_value(entry)
                    .or_else(|| entry.get("id").and_then(id_from_value))
                    .or_else(|| entry.get("userId").and_then(id_from_value))
            })
            .collect()
    }
}

/// A typed dependency edge, from either the project-level link list or a
/// task's embedded dependency list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDependency {
    #[serde(default, alias = "Id", deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default, alias = "ParentId", deserialize_with = "opt_id")]
    pub parent_id: Option<String>,
    #[serde(default, alias = "ChildId", deserialize_with = "opt_id")]
    pub child_id: Option<String>,
    #[serde(default, rename = "type", alias = "Type")]
    pub kind: Option<Value>,
    #[serde(
        default,
        alias = "SourceTaskId",
        alias = "source",
        deserialize_with = "opt_id"
    )]
    pub source_task_id: Option<String>,
    #[serde(
        default,
        alias = "TargetTaskId",
        alias = "target",
        deserialize_with = "opt_id"
    )]
    pub target_task_id: Option<String>,
}

impl RawDependency {
    pub fn from_value_lenient(value: &Value) -> Option<RawDependency> {
        match serde_json::from_value(value.clone()) {
            Ok(dep) => Some(dep),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unparseable dependency");
                None
            }
        }
    }

    /// Source endpoint under either naming convention.
    pub fn source(&self) -> Option<&str> {
        self.source_task_id
            .as_deref()
            .or(self.parent_id.as_deref())
    }

    /// Target endpoint under either naming convention.
    pub fn target(&self) -> Option<&str> {
        self.target_task_id.as_deref().or(self.child_id.as_deref())
    }
}

/// One project member with whatever role encoding that backend generation
/// used (numeric ordinal, enum name, plain string).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    #[serde(
        default,
        alias = "Id",
        alias = "userId",
        alias = "UserId",
        alias = "memberId",
        alias = "MemberId",
        deserialize_with = "opt_id"
    )]
    pub id: Option<String>,
    #[serde(default, alias = "Role")]
    pub role: Option<Value>,
}

impl RawMember {
    pub fn from_value_lenient(value: &Value) -> Option<RawMember> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Outbound task shape for `createTask` / `updateTask`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub name: String,
    pub description: String,
    pub is_completed: bool,
    /// RFC 3339 instant anchored at UTC noon.
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Outbound dependency shape for `addDependency` / `removeDependency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDto {
    pub parent_id: String,
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: i64,
}

/// Response to `createTask`; only the assigned id matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedTask {
    #[serde(default, alias = "Id", deserialize_with = "opt_id")]
    pub id: Option<String>,
}
