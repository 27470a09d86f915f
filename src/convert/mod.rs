//! The schema converter.
//!
//! Stateless translation between the backend's tree-of-tasks payload and the
//! widget's flat task-list-with-links projection. The inbound direction
//! never fails: every field degrades to a stated default, so one malformed
//! task cannot block rendering of the rest of the tree (availability over
//! strictness). The outbound direction produces the canonical camelCase
//! DTOs with UTC-noon-anchored instants.

pub mod dates;
pub mod link_type;

use chrono::Utc;
use serde_json::Value;

use crate::model::backend::{DependencyDto, RawDependency, RawProject, RawTask, TaskDto};
use crate::model::widget::{LinkKind, TaskId, WidgetLink, WidgetTask, WidgetTree};

/// Label given to tasks the backend sent without a name.
pub const DEFAULT_TASK_LABEL: &str = "New task";

/// Project payload → widget projection, with the default task label.
pub fn to_widget_format(payload: &Value) -> WidgetTree {
    to_widget_format_with(payload, DEFAULT_TASK_LABEL)
}

/// Project payload → widget projection.
///
/// Merges the root task with both task-list spellings, resolves each date
/// field from any of its historical names, and derives links from the
/// tasks' embedded dependency lists whenever the payload carries no
/// project-level link list. Tasks without a usable id are dropped; every
/// other absent field takes its default.
pub fn to_widget_format_with(payload: &Value, default_label: &str) -> WidgetTree {
    let project = RawProject::from_payload(payload);
    let raw_tasks = project.merged_tasks();

    let mut tasks = Vec::with_capacity(raw_tasks.len());
    for raw in &raw_tasks {
        let Some(id) = raw.id.clone() else {
            tracing::debug!("dropping task without id");
            continue;
        };
        let start = raw.start_time.as_deref().and_then(dates::parse_day);
        let end = raw.end_time.as_deref().and_then(dates::parse_day);
        let is_completed = raw.is_completed.unwrap_or(false);
        let progress = raw
            .numeric_progress()
            .unwrap_or(if is_completed { 1.0 } else { 0.0 })
            .clamp(0.0, 1.0);
        tasks.push(WidgetTask {
            id: TaskId::persisted(id),
            label: raw
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| default_label.to_owned()),
            start_date: start.unwrap_or_else(|| Utc::now().date_naive()),
            duration_days: dates::duration_days(start, end),
            progress,
            parent_id: raw.parent_id.clone().map(TaskId::persisted),
            is_completed,
            performer_ids: raw.performer_ids(),
        });
    }

    let links = if project.links.is_empty() {
        links_from_dependencies(&raw_tasks)
    } else {
        project
            .links
            .iter()
            .filter_map(RawDependency::from_value_lenient)
            .filter_map(|raw| widget_link(&raw, None))
            .collect()
    };

    WidgetTree { tasks, links }
}

/// Older payloads carry no link list; each task then embeds its own
/// dependency edges, with the owning task as the implicit child.
fn links_from_dependencies(tasks: &[RawTask]) -> Vec<WidgetLink> {
    tasks
        .iter()
        .flat_map(|task| {
            task.dependencies
                .iter()
                .filter_map(RawDependency::from_value_lenient)
                .filter_map(|raw| widget_link(&raw, task.id.as_deref()))
        })
        .collect()
}

fn widget_link(raw: &RawDependency, implicit_child: Option<&str>) -> Option<WidgetLink> {
    let source = raw.source()?.to_owned();
    let target = raw.target().or(implicit_child)?.to_owned();
    let id = raw
        .id
        .clone()
        .unwrap_or_else(|| format!("{source}-{target}"));
    Some(WidgetLink {
        id,
        kind: LinkKind::from_backend_value(raw.kind.as_ref()),
        source: TaskId::persisted(source),
        target: TaskId::persisted(target),
    })
}

/// Widget task → backend DTO.
///
/// Instants are anchored at UTC noon so truncating them back to a date can
/// never shift it across a day boundary; the end instant is the start plus
/// the whole-day duration.
pub fn to_backend_task(task: &WidgetTask, project_id: Option<&str>) -> TaskDto {
    TaskDto {
        project_id: project_id.map(str::to_owned),
        name: task.label.clone(),
        description: String::new(),
        is_completed: task.is_completed || task.progress >= 1.0,
        start_time: dates::to_wire(dates::start_instant(task.start_date)),
        end_time: dates::to_wire(dates::end_instant(task.start_date, task.duration_days)),
        parent_id: task
            .parent_id
            .as_ref()
            .and_then(TaskId::as_persisted)
            .map(str::to_owned),
    }
}

/// Widget link → backend dependency DTO.
///
/// `None` while either endpoint is still pending: the backend cannot attach
/// an edge to a task it has never seen.
pub fn to_dependency_dto(link: &WidgetLink) -> Option<DependencyDto> {
    Some(DependencyDto {
        parent_id: link.source.as_persisted()?.to_owned(),
        child_id: link.target.as_persisted()?.to_owned(),
        kind: link.kind.to_backend_code(),
    })
}

/// The whole widget tree in backend form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendBatch {
    pub tasks: Vec<TaskDto>,
    pub dependencies: Vec<DependencyDto>,
}

/// Inverse of [`to_widget_format`] over a whole tree.
pub fn to_backend_format(tree: &WidgetTree, project_id: &str) -> BackendBatch {
    BackendBatch {
        tasks: tree
            .tasks
            .iter()
            .map(|task| to_backend_task(task, Some(project_id)))
            .collect(),
        dependencies: tree.links.iter().filter_map(to_dependency_dto).collect(),
    }
}
