//! The rendering widget's capability surface.

use crate::model::widget::{TaskId, WidgetTask, WidgetTree};

/// What the engine needs from the interactive tree/timeline component.
///
/// The real implementation wraps the rendering widget; tests substitute a
/// recording fake. The engine is the only caller of `render`, and it always
/// passes a complete replacement tree, never a patch.
pub trait GanttWidget: Send {
    /// Replace the rendered tree wholesale.
    fn render(&mut self, tree: WidgetTree);

    /// Read a task back from the widget's current state.
    fn task(&self, id: &TaskId) -> Option<WidgetTask>;

    /// Reflect a completion value in the row's status control (used for the
    /// optimistic toggle and its revert) without re-rendering the tree.
    fn set_task_completion(&mut self, id: &TaskId, completed: bool, progress: f64);

    /// Surface a user-visible error message next to the view.
    fn show_error(&mut self, message: &str);
}
