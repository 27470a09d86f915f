//! # gantt-sync — bidirectional task-graph synchronization
//!
//! `gantt-sync` keeps a visual task-scheduling widget and a remote
//! project-management backend consistent with each other. The two sides speak
//! different dialects of the same graph: the widget holds a flat task list
//! with parent pointers and typed links, the backend a tree of tasks with
//! typed dependency edges. This crate owns the translation and the event
//! plumbing between them:
//!
//! - **Schema conversion**: stateless mapping between backend payloads and
//!   widget records ([`convert`]), tolerant of every historical field-name
//!   variant the backend has emitted.
//! - **Codecs**: the authoritative link-type table ([`convert::link_type`])
//!   and day-granular date/duration handling ([`convert::dates`]).
//! - **Role normalization**: heterogeneous role encodings collapse into a
//!   binary admin/member classification ([`model::role`]).
//! - **Graph synchronization**: the [`sync::GraphSync`] engine intercepts
//!   every widget mutation, replays it as a remote call, and reconciles by
//!   refetching the authoritative project tree.
//!
//! The rendering widget and the HTTP transport are external collaborators,
//! consumed through the [`sync::GanttWidget`], [`service::ProjectService`]
//! and [`service::TaskService`] traits.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use gantt_sync::{GraphSync, WidgetEvent};
//! # async fn run(widget: impl gantt_sync::GanttWidget,
//! #              projects: std::sync::Arc<dyn gantt_sync::ProjectService>,
//! #              tasks: std::sync::Arc<dyn gantt_sync::TaskService>,
//! #              event: WidgetEvent) {
//! let mut sync = GraphSync::builder("project-42", widget, projects, tasks)
//!     .viewer("user-1")
//!     .build();
//! sync.attach().await.unwrap();
//! sync.dispatch(event).await.ok();
//! # }
//! ```
//!
//! The backend project is the single source of truth: widget state is a
//! derived projection, rebuilt in full on every reload, never patched in
//! place.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod service;
pub mod session;
pub mod sync;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use model::role::Role;
pub use model::widget::{LinkKind, TaskId, WidgetLink, WidgetTask, WidgetTree};
pub use service::{ProjectService, StatusOutcome, TaskService};
pub use session::Session;
pub use sync::{GanttWidget, GraphSync, SyncState, WidgetEvent};
