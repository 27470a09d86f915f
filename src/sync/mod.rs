//! The event-driven synchronization layer.
//!
//! - [`event`] — the tagged widget-event type, one variant per intercepted
//!   mutation.
//! - [`widget`] — the rendering collaborator's capability surface.
//! - [`engine`] — [`GraphSync`], the dispatcher / state machine.
//! - [`performers`] — minimal set-diffing for assignment edits.

pub mod engine;
pub mod event;
pub mod performers;
pub mod widget;

pub use engine::{GraphSync, GraphSyncBuilder, SyncState};
pub use event::WidgetEvent;
pub use widget::GanttWidget;
