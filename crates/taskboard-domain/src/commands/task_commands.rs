use super::{with_task, Command, CommandContext};
use crate::{ChecklistItem, Comment, ImageAttachment, Task, TaskId, TaskStatus};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Create a task at the end of the collection.
pub struct CreateTask {
    pub text: String,
}

impl Command for CreateTask {
    type Output = Task;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Task> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(TaskboardError::Validation(
                "Please enter a task!".to_string(),
            ));
        }
        let task = Task::new(context.ids.next_id(), text.to_string());
        context.tasks.push(task.clone());
        context.mark_dirty();
        Ok(task)
    }

    fn description(&self) -> String {
        format!("Create task: '{}'", self.text.trim())
    }
}

/// Reassign a task's status. Unknown ids change nothing.
pub struct MoveTask {
    pub task_id: TaskId,
    pub status: TaskStatus,
}

impl Command for MoveTask {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        let status = self.status;
        Ok(with_task(context, self.task_id, |task, _| {
            task.move_to(status);
            true
        }))
    }

    fn description(&self) -> String {
        format!("Move task {} to {}", self.task_id, self.status)
    }
}

/// Remove a task and everything attached to it.
pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    type Output = bool;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<bool> {
        let before = context.tasks.len();
        context.tasks.retain(|task| task.id != self.task_id);
        let removed = context.tasks.len() != before;
        if removed {
            context.mark_dirty();
        }
        Ok(removed)
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}

/// Replace the free-text description.
pub struct UpdateDescription {
    pub task_id: TaskId,
    pub description: String,
}

impl Command for UpdateDescription {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        let description = self.description.clone();
        Ok(with_task(context, self.task_id, |task, _| {
            task.update_description(description);
            true
        }))
    }

    fn description(&self) -> String {
        format!("Update description of task {}", self.task_id)
    }
}

/// Wholesale replacement of a nested collection.
pub enum ReplaceCollection {
    Checklist(Vec<ChecklistItem>),
    Images(Vec<ImageAttachment>),
    Comments(Vec<Comment>),
}

pub struct ReplaceTaskCollection {
    pub task_id: TaskId,
    pub collection: ReplaceCollection,
}

impl Command for ReplaceTaskCollection {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            match &self.collection {
                ReplaceCollection::Checklist(items) => task.checklist = items.clone(),
                ReplaceCollection::Images(images) => task.images = images.clone(),
                ReplaceCollection::Comments(comments) => task.comments = comments.clone(),
            }
            true
        }))
    }

    fn description(&self) -> String {
        let name = match self.collection {
            ReplaceCollection::Checklist(_) => "checklist",
            ReplaceCollection::Images(_) => "images",
            ReplaceCollection::Comments(_) => "comments",
        };
        format!("Replace {} of task {}", name, self.task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::MonotonicClockIds;

    fn run<C: Command>(tasks: &mut Vec<Task>, ids: &MonotonicClockIds, cmd: C) -> (C::Output, bool) {
        let mut ctx = CommandContext::new(tasks, ids);
        let out = cmd.execute(&mut ctx).unwrap();
        let dirty = ctx.is_dirty();
        (out, dirty)
    }

    #[test]
    fn test_create_trims_and_appends() {
        let ids = MonotonicClockIds::with_clock(|| 10);
        let mut tasks = vec![];
        let (task, dirty) = run(
            &mut tasks,
            &ids,
            CreateTask {
                text: "  Buy milk ".to_string(),
            },
        );
        assert!(dirty);
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.id, 10);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_text() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![];
        let mut ctx = CommandContext::new(&mut tasks, &ids);
        let err = CreateTask {
            text: " \t ".to_string(),
        }
        .execute(&mut ctx)
        .unwrap_err();
        assert!(err.is_validation());
        assert!(!ctx.is_dirty());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_move_unknown_task_is_clean_noop() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![Task::new(1, "A".to_string())];
        let (moved, dirty) = run(
            &mut tasks,
            &ids,
            MoveTask {
                task_id: 99,
                status: TaskStatus::Done,
            },
        );
        assert!(moved.is_none());
        assert!(!dirty);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn test_delete() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![Task::new(1, "A".to_string()), Task::new(2, "B".to_string())];
        let (removed, dirty) = run(&mut tasks, &ids, DeleteTask { task_id: 1 });
        assert!(removed && dirty);
        assert_eq!(tasks.len(), 1);

        let (removed, dirty) = run(&mut tasks, &ids, DeleteTask { task_id: 1 });
        assert!(!removed && !dirty);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_replace_collection() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![Task::new(1, "A".to_string())];
        let (task, _) = run(
            &mut tasks,
            &ids,
            ReplaceTaskCollection {
                task_id: 1,
                collection: ReplaceCollection::Checklist(vec![ChecklistItem::new(
                    5,
                    "x".to_string(),
                )]),
            },
        );
        assert_eq!(task.unwrap().checklist.len(), 1);
        assert_eq!(tasks[0].checklist[0].id, 5);
    }
}
