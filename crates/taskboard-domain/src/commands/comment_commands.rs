use super::{with_task, Command, CommandContext};
use crate::{Comment, CommentId, Task, TaskId};
use taskboard_core::TaskboardResult;

/// Append a comment. `date` is the already formatted creation time.
pub struct AddComment {
    pub task_id: TaskId,
    pub text: String,
    pub date: String,
}

impl Command for AddComment {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        let text = self.text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(with_task(context, self.task_id, |task, ids| {
            task.comments.push(Comment::new(
                ids.next_id(),
                text.to_string(),
                self.date.clone(),
            ));
            true
        }))
    }

    fn description(&self) -> String {
        format!("Comment on task {}", self.task_id)
    }
}

pub struct DeleteComment {
    pub task_id: TaskId,
    pub comment_id: CommentId,
}

impl Command for DeleteComment {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            let before = task.comments.len();
            task.comments.retain(|comment| comment.id != self.comment_id);
            task.comments.len() != before
        }))
    }

    fn description(&self) -> String {
        format!("Delete comment {} of task {}", self.comment_id, self.task_id)
    }
}
