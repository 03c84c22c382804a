pub mod board;
pub mod checklist;
pub mod comment;
pub mod image;
pub mod task;

use taskboard_core::TaskboardError;
use taskboard_domain::{Task, TaskBoardOperations, TaskId};

/// Explicit ids must exist; the CLI reports a miss instead of ignoring it.
pub(crate) async fn require_task<O: TaskBoardOperations>(
    ops: &O,
    id: TaskId,
) -> anyhow::Result<Task> {
    ops.get_task(id)
        .await?
        .ok_or_else(|| TaskboardError::not_found("Task", id).into())
}

pub(crate) fn found(task: Option<Task>, id: TaskId) -> anyhow::Result<Task> {
    task.ok_or_else(|| TaskboardError::not_found("Task", id).into())
}
