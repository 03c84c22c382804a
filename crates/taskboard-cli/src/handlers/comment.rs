use super::{found, require_task};
use crate::cli::CommentAction;
use crate::output;
use taskboard_core::TaskboardError;
use taskboard_domain::TaskBoardOperations;

pub async fn handle<O: TaskBoardOperations>(ops: &O, action: CommentAction) -> anyhow::Result<()> {
    match action {
        CommentAction::Add { task, text } => {
            let current = require_task(ops, task).await?;
            let updated = ops.add_comment(task, &text).await?.unwrap_or(current);
            output::output_success(&updated);
        }
        CommentAction::Delete { task, comment } => {
            let current = require_task(ops, task).await?;
            if !current.comments.iter().any(|c| c.id == comment) {
                return Err(TaskboardError::not_found("Comment", comment).into());
            }
            let updated = found(ops.delete_comment(task, comment).await?, task)?;
            output::output_success(&updated);
        }
    }
    Ok(())
}
