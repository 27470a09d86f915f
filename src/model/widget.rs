//! Widget-side task and link records.
//!
//! These are a derived, disposable projection of the backend project: the
//! engine rebuilds them wholesale on every reload and never treats them as
//! authoritative.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

/// Task identity as the widget sees it.
///
/// A task created locally carries a client-generated [`TaskId::Pending`] id
/// until its first successful save; remote calls against a pending id are
/// skipped, because the backend has never heard of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// Client-generated placeholder, never sent to the backend.
    Pending(Uuid),
    /// Backend-assigned id.
    Persisted(String),
}

impl TaskId {
    /// Mint a fresh placeholder id for a not-yet-saved task.
    pub fn pending() -> Self {
        TaskId::Pending(Uuid::new_v4())
    }

    pub fn persisted(id: impl Into<String>) -> Self {
        TaskId::Persisted(id.into())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TaskId::Pending(_))
    }

    /// The backend id, if this task has one.
    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            TaskId::Persisted(id) => Some(id.as_str()),
            TaskId::Pending(_) => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Pending(uuid) => write!(f, "pending:{uuid}"),
            TaskId::Persisted(id) => f.write_str(id),
        }
    }
}

/// The four dependency kinds the widget understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

/// One row in the widget's task list.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTask {
    pub id: TaskId,
    pub label: String,
    /// Date-only start; the widget layer never sees instants.
    pub start_date: NaiveDate,
    /// Whole days, always >= 1.
    pub duration_days: i64,
    /// 0.0..=1.0; derived from `is_completed` when the backend supplies no
    /// explicit progress.
    pub progress: f64,
    pub parent_id: Option<TaskId>,
    pub is_completed: bool,
    pub performer_ids: Vec<String>,
}

/// A typed precedence edge between two widget tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetLink {
    pub id: String,
    pub kind: LinkKind,
    pub source: TaskId,
    pub target: TaskId,
}

/// The full projection the widget renders: a set of tasks keyed by id plus
/// the typed edges between them. Ordering carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTree {
    pub tasks: Vec<WidgetTask>,
    pub links: Vec<WidgetLink>,
}

impl WidgetTree {
    pub fn task(&self, id: &TaskId) -> Option<&WidgetTask> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.links.is_empty()
    }
}
