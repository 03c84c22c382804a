use super::{found, require_task};
use crate::cli::TaskAction;
use crate::output;
use taskboard_core::TaskboardError;
use taskboard_domain::{Task, TaskBoardOperations, TaskId};

pub async fn handle<O: TaskBoardOperations>(ops: &O, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add { text } => {
            let task = ops.add_task(&text).await?;
            output::output_success(&task);
        }
        TaskAction::List { status } => {
            let tasks: Vec<Task> = ops
                .list_tasks()
                .await?
                .into_iter()
                .filter(|task| status.map_or(true, |s| task.status == s))
                .collect();
            output::output_list(tasks);
        }
        TaskAction::Get { id } => {
            let task = require_task(ops, id).await?;
            output::output_success(&task);
        }
        TaskAction::Move { id, status } => {
            let task = found(ops.move_task(id, status).await?, id)?;
            output::output_success(&task);
        }
        TaskAction::Start { id } => transition(ops, id, "start", "Start").await?,
        TaskAction::Back { id } => transition(ops, id, "move back", "To Do").await?,
        TaskAction::Complete { id } => transition(ops, id, "complete", "Done").await?,
        TaskAction::Reopen { id } => transition(ops, id, "reopen", "Reopen").await?,
        TaskAction::Delete { id } => {
            if !ops.delete_task(id).await? {
                return Err(TaskboardError::not_found("Task", id).into());
            }
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Describe { id, text } => {
            let task = found(ops.update_description(id, &text).await?, id)?;
            output::output_success(&task);
        }
    }
    Ok(())
}

/// Press the card button labelled `label`. Only cards in a column offering
/// that button can take it.
async fn transition<O: TaskBoardOperations>(
    ops: &O,
    id: TaskId,
    verb: &str,
    label: &str,
) -> anyhow::Result<()> {
    let task = require_task(ops, id).await?;
    let Some(target) = task
        .status
        .transitions()
        .iter()
        .find(|t| t.label == label)
        .map(|t| t.target)
    else {
        return Err(TaskboardError::Validation(format!(
            "Cannot {} task {}: it is in {}",
            verb,
            id,
            task.status.title()
        ))
        .into());
    };
    let task = found(ops.move_task(id, target).await?, id)?;
    output::output_success(&task);
    Ok(())
}
