use super::{found, require_task};
use crate::cli::ChecklistAction;
use crate::output;
use taskboard_core::TaskboardError;
use taskboard_domain::{ChecklistItemId, Task, TaskBoardOperations};

pub async fn handle<O: TaskBoardOperations>(
    ops: &O,
    action: ChecklistAction,
) -> anyhow::Result<()> {
    match action {
        ChecklistAction::Add { task, text } => {
            let current = require_task(ops, task).await?;
            // Blank text changes nothing
            let updated = ops.add_checklist_item(task, &text).await?.unwrap_or(current);
            output::output_success(&updated);
        }
        ChecklistAction::Toggle { task, item } => {
            require_item(&require_task(ops, task).await?, item)?;
            let updated = found(ops.toggle_checklist_item(task, item).await?, task)?;
            output::output_success(&updated);
        }
        ChecklistAction::Delete { task, item } => {
            require_item(&require_task(ops, task).await?, item)?;
            let updated = found(ops.delete_checklist_item(task, item).await?, task)?;
            output::output_success(&updated);
        }
    }
    Ok(())
}

fn require_item(task: &Task, item: ChecklistItemId) -> anyhow::Result<()> {
    if task.checklist.iter().any(|i| i.id == item) {
        Ok(())
    } else {
        Err(TaskboardError::not_found("Checklist item", item).into())
    }
}
