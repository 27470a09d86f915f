//! Widget events.
//!
//! The widget's add/update/delete/link/editor callbacks all funnel into one
//! tagged value consumed by a single dispatch function, so sequencing is
//! deterministic and the engine can be tested without a live widget.

use crate::model::widget::{TaskId, WidgetLink, WidgetTask};

/// One intercepted local mutation.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    TaskCreated {
        task: WidgetTask,
    },
    TaskUpdated {
        id: TaskId,
        task: WidgetTask,
    },
    TaskDeleted {
        id: TaskId,
    },
    LinkCreated {
        link: WidgetLink,
    },
    LinkDeleted {
        link: WidgetLink,
    },
    /// The dedicated completion control in the tree row was clicked.
    StatusToggled {
        id: TaskId,
    },
    /// The assignment editor was committed with this selection.
    PerformersEdited {
        id: TaskId,
        selected: Vec<String>,
    },
}
