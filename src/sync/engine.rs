//! The graph synchronization engine.
//!
//! [`GraphSync`] intercepts every local widget mutation, replays it as the
//! corresponding remote call, and reconciles by refetching the whole
//! project: the backend is the only source of ids and child counts, so
//! reload-and-replace is the single reconciliation point and optimistic
//! local state is never retained past it.
//!
//! Per mounted view the engine moves through
//! `Uninitialized → Loading → Ready ⇄ Mutating`, dropping to `Error` on a
//! failed remote call and back to `Ready` on the next successful one. A
//! failure never blanks the view: the last successfully rendered tree stays
//! up and the error is surfaced to the user.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::config::SyncConfig;
use crate::convert;
use crate::error::{SyncError, SyncResult};
use crate::model::role::{self, Role};
use crate::model::widget::{TaskId, WidgetLink, WidgetTask, WidgetTree};
use crate::service::{ProjectService, StatusOutcome, TaskService};
use crate::sync::event::WidgetEvent;
use crate::sync::performers;
use crate::sync::widget::GanttWidget;

/// Lifecycle state of one mounted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Loading,
    Ready,
    Mutating,
    Error,
}

/// The event dispatcher tying a widget to the remote services.
pub struct GraphSync<W: GanttWidget> {
    widget: W,
    projects: Arc<dyn ProjectService>,
    tasks: Arc<dyn TaskService>,
    project_id: String,
    viewer_id: Option<String>,
    config: SyncConfig,
    state: SyncState,
    viewer_role: Role,
    /// One-shot flag set by a status toggle: the same interaction also fires
    /// a generic update event, which must be swallowed exactly once to avoid
    /// a duplicate stale-data PATCH.
    suppress_next_update: Option<TaskId>,
    reload_in_flight: bool,
}

/// Builder for [`GraphSync`]; the widget and both services are mandatory
/// collaborators and come in through [`GraphSync::builder`].
pub struct GraphSyncBuilder<W: GanttWidget> {
    widget: W,
    projects: Arc<dyn ProjectService>,
    tasks: Arc<dyn TaskService>,
    project_id: String,
    viewer_id: Option<String>,
    config: SyncConfig,
}

impl<W: GanttWidget> GraphSyncBuilder<W> {
    /// Identify the viewing user, enabling role resolution on reload.
    pub fn viewer(mut self, user_id: impl Into<String>) -> Self {
        self.viewer_id = Some(user_id.into());
        self
    }

    pub fn config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> GraphSync<W> {
        GraphSync {
            widget: self.widget,
            projects: self.projects,
            tasks: self.tasks,
            project_id: self.project_id,
            viewer_id: self.viewer_id,
            config: self.config,
            state: SyncState::Uninitialized,
            viewer_role: Role::Member,
            suppress_next_update: None,
            reload_in_flight: false,
        }
    }
}

impl<W: GanttWidget> GraphSync<W> {
    pub fn builder(
        project_id: impl Into<String>,
        widget: W,
        projects: Arc<dyn ProjectService>,
        tasks: Arc<dyn TaskService>,
    ) -> GraphSyncBuilder<W> {
        GraphSyncBuilder {
            widget,
            projects,
            tasks,
            project_id: project_id.into(),
            viewer_id: None,
            config: SyncConfig::default(),
        }
    }

    /// Mount the view: perform the initial load and first render.
    pub async fn attach(&mut self) -> SyncResult<()> {
        self.reload().await
    }

    /// Unmount the view, clearing the rendered tree.
    pub fn dispose(&mut self) {
        self.widget.render(WidgetTree::default());
        self.suppress_next_update = None;
        self.state = SyncState::Uninitialized;
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The viewing user's role as of the last reload; gates admin-only UI
    /// such as the member-management panel.
    pub fn viewer_role(&self) -> Role {
        self.viewer_role
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Replay one intercepted widget mutation against the backend.
    ///
    /// Failures are surfaced through the widget and logged; the last
    /// rendered tree is kept and nothing is retried automatically. The
    /// result is also returned for callers that want to observe it.
    pub async fn dispatch(&mut self, event: WidgetEvent) -> SyncResult<()> {
        let result = match event {
            WidgetEvent::TaskCreated { task } => self.on_task_created(task).await,
            WidgetEvent::TaskUpdated { id, task } => self.on_task_updated(id, task).await,
            WidgetEvent::TaskDeleted { id } => self.on_task_deleted(id).await,
            WidgetEvent::LinkCreated { link } => self.on_link_created(link).await,
            WidgetEvent::LinkDeleted { link } => self.on_link_deleted(link).await,
            WidgetEvent::StatusToggled { id } => self.on_status_toggled(id).await,
            WidgetEvent::PerformersEdited { id, selected } => {
                self.on_performers_edited(id, selected).await
            }
        };
        if let Err(err) = &result {
            self.state = SyncState::Error;
            tracing::warn!(
                error = %err,
                project = %self.project_id,
                "mutation failed; keeping last rendered tree"
            );
            self.widget.show_error(&err.to_string());
        }
        result
    }

    /// Refetch the authoritative project tree and replace the rendered one.
    ///
    /// Idempotent, and guarded against overlap: a reload requested while
    /// another is in flight is skipped rather than queued, since the one in
    /// flight already fetches the newest state.
    pub async fn reload(&mut self) -> SyncResult<()> {
        if self.reload_in_flight {
            tracing::debug!(project = %self.project_id, "reload already in flight; skipping");
            return Ok(());
        }
        self.reload_in_flight = true;
        self.state = SyncState::Loading;

        let projects = Arc::clone(&self.projects);
        let project_id = self.project_id.clone();
        let fetched = with_timeout(self.config.remote_timeout, async move {
            projects.get_project(&project_id).await
        })
        .await;
        self.reload_in_flight = false;

        let payload = match fetched {
            Ok(payload) => payload,
            Err(err) => {
                self.state = SyncState::Error;
                return Err(err);
            }
        };
        self.viewer_role = role::resolve_viewer_role(&payload, self.viewer_id.as_deref());
        let tree = convert::to_widget_format_with(&payload, &self.config.default_task_label);
        tracing::debug!(
            project = %self.project_id,
            tasks = tree.tasks.len(),
            links = tree.links.len(),
            "rendering reloaded tree"
        );
        self.widget.render(tree);
        self.state = SyncState::Ready;
        Ok(())
    }

    async fn on_task_created(&mut self, task: WidgetTask) -> SyncResult<()> {
        self.state = SyncState::Mutating;
        let dto = convert::to_backend_task(&task, Some(&self.project_id));
        let tasks = Arc::clone(&self.tasks);
        let created =
            with_timeout(self.config.remote_timeout, async move {
                tasks.create_task(&dto).await
            })
            .await?;
        tracing::debug!(assigned_id = ?created.id, "task created");
        self.reload().await
    }

    async fn on_task_updated(&mut self, id: TaskId, task: WidgetTask) -> SyncResult<()> {
        if let Some(suppressed) = self.suppress_next_update.take() {
            if suppressed == id {
                tracing::debug!(task = %id, "swallowing update event paired with status toggle");
                return Ok(());
            }
            // Stale flag for a different task: drop it and handle normally.
        }
        let Some(remote_id) = id.as_persisted().map(str::to_owned) else {
            tracing::debug!(task = %id, "skipping update of unsaved task");
            return Ok(());
        };
        self.state = SyncState::Mutating;
        let dto = convert::to_backend_task(&task, Some(&self.project_id));
        let tasks = Arc::clone(&self.tasks);
        with_timeout(self.config.remote_timeout, async move {
            tasks.update_task(&remote_id, &dto).await
        })
        .await?;
        self.reload().await
    }

    async fn on_task_deleted(&mut self, id: TaskId) -> SyncResult<()> {
        let Some(remote_id) = id.as_persisted().map(str::to_owned) else {
            // Nothing on the server yet; the reload prunes the local row.
            return self.reload().await;
        };
        self.state = SyncState::Mutating;
        let tasks = Arc::clone(&self.tasks);
        with_timeout(self.config.remote_timeout, async move {
            tasks.delete_task(&remote_id).await
        })
        .await?;
        self.reload().await
    }

    async fn on_link_created(&mut self, link: WidgetLink) -> SyncResult<()> {
        let Some(dep) = convert::to_dependency_dto(&link) else {
            tracing::debug!(link = %link.id, "skipping link with unsaved endpoint");
            return Ok(());
        };
        self.state = SyncState::Mutating;
        let owner = dep.child_id.clone();
        let tasks = Arc::clone(&self.tasks);
        with_timeout(self.config.remote_timeout, async move {
            tasks.add_dependency(&owner, &dep).await
        })
        .await?;
        self.reload().await
    }

    async fn on_link_deleted(&mut self, link: WidgetLink) -> SyncResult<()> {
        let Some(dep) = convert::to_dependency_dto(&link) else {
            return Ok(());
        };
        self.state = SyncState::Mutating;
        let owner = dep.child_id.clone();
        let tasks = Arc::clone(&self.tasks);
        with_timeout(self.config.remote_timeout, async move {
            tasks.remove_dependency(&owner, &dep).await
        })
        .await?;
        self.reload().await
    }

    async fn on_status_toggled(&mut self, id: TaskId) -> SyncResult<()> {
        let Some(task) = self.widget.task(&id) else {
            return Err(SyncError::TaskNotFound(id.to_string()));
        };
        let current = task.is_completed;
        let next = !current;
        // Optimistic: reflect the new value in the control right away.
        self.widget
            .set_task_completion(&id, next, progress_for(next));

        let Some(remote_id) = id.as_persisted().map(str::to_owned) else {
            // Unsaved task: the flip stays local, but the paired generic
            // update event still fires and must be swallowed.
            self.suppress_next_update = Some(id);
            return Ok(());
        };

        self.state = SyncState::Mutating;
        let tasks = Arc::clone(&self.tasks);
        let outcome = with_timeout(self.config.remote_timeout, async move {
            tasks.set_status(&remote_id, next).await
        })
        .await;
        self.suppress_next_update = Some(id.clone());

        match outcome {
            Ok(StatusOutcome { success: true, .. }) => {
                // The control already shows the new value; no reload needed,
                // link edges and tree shape are unaffected.
                self.state = SyncState::Ready;
                Ok(())
            }
            Ok(StatusOutcome {
                success: false,
                message,
            }) => {
                self.widget
                    .set_task_completion(&id, current, progress_for(current));
                Err(SyncError::ValidationRejected(message.unwrap_or_else(
                    || "the server refused the status change".to_owned(),
                )))
            }
            Err(err) => {
                self.widget
                    .set_task_completion(&id, current, progress_for(current));
                Err(err)
            }
        }
    }

    async fn on_performers_edited(&mut self, id: TaskId, selected: Vec<String>) -> SyncResult<()> {
        let Some(remote_id) = id.as_persisted().map(str::to_owned) else {
            tracing::debug!(task = %id, "skipping performer edit on unsaved task");
            return Ok(());
        };
        let previous = self
            .widget
            .task(&id)
            .map(|task| task.performer_ids)
            .unwrap_or_default();
        let delta = performers::diff(&previous, &selected);
        if delta.is_empty() {
            return Ok(());
        }

        self.state = SyncState::Mutating;
        let tasks = Arc::clone(&self.tasks);
        with_timeout(self.config.remote_timeout, async move {
            let adds = delta
                .to_add
                .iter()
                .map(|user_id| tasks.add_performer(&remote_id, user_id));
            let removes = delta
                .to_remove
                .iter()
                .map(|user_id| tasks.remove_performer(&remote_id, user_id));
            let (adds, removes) = futures::join!(join_all(adds), join_all(removes));
            adds.into_iter()
                .chain(removes)
                .collect::<SyncResult<Vec<()>>>()?;
            Ok(())
        })
        .await?;
        self.reload().await
    }

    /// Out-of-band membership operations; each is followed by a reload so
    /// role-gated surfaces re-resolve.
    pub async fn add_member(&mut self, user_id: &str) -> SyncResult<()> {
        let projects = Arc::clone(&self.projects);
        let project_id = self.project_id.clone();
        let user_id = user_id.to_owned();
        with_timeout(self.config.remote_timeout, async move {
            projects.add_member(&project_id, &user_id).await
        })
        .await?;
        self.reload().await
    }

    pub async fn remove_member(&mut self, user_id: &str) -> SyncResult<()> {
        let projects = Arc::clone(&self.projects);
        let project_id = self.project_id.clone();
        let user_id = user_id.to_owned();
        with_timeout(self.config.remote_timeout, async move {
            projects.remove_member(&project_id, &user_id).await
        })
        .await?;
        self.reload().await
    }

    pub async fn change_role(&mut self, member_id: &str, role: Role) -> SyncResult<()> {
        let projects = Arc::clone(&self.projects);
        let project_id = self.project_id.clone();
        let member_id = member_id.to_owned();
        with_timeout(self.config.remote_timeout, async move {
            projects.change_role(&project_id, &member_id, role).await
        })
        .await?;
        self.reload().await
    }
}

fn progress_for(completed: bool) -> f64 {
    if completed {
        1.0
    } else {
        0.0
    }
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = SyncResult<T>>,
) -> SyncResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(SyncError::Timeout(limit)),
    }
}
