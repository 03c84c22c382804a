use taskboard_core::{IdGenerator, TaskboardResult};

pub mod checklist_commands;
pub mod comment_commands;
pub mod image_commands;
pub mod task_commands;

pub use checklist_commands::*;
pub use comment_commands::*;
pub use image_commands::*;
pub use task_commands::*;

use crate::{Task, TaskId};

/// A single mutation of the task collection.
///
/// Commands run against the freshly loaded collection; whoever executes them
/// is responsible for loading before and saving after.
pub trait Command: Send + Sync {
    type Output: Send;

    /// Apply the mutation. Commands that change nothing must leave the
    /// context clean so that no write happens.
    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Self::Output>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Everything a command may touch.
pub struct CommandContext<'a> {
    pub tasks: &'a mut Vec<Task>,
    pub ids: &'a dyn IdGenerator,
    dirty: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(tasks: &'a mut Vec<Task>, ids: &'a dyn IdGenerator) -> Self {
        Self {
            tasks,
            ids,
            dirty: false,
        }
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Run `f` on the task with `task_id`, marking the context dirty if it was
/// found and `f` reports a change. Returns the task as it is afterwards.
pub(crate) fn with_task<F>(
    context: &mut CommandContext,
    task_id: TaskId,
    f: F,
) -> Option<Task>
where
    F: FnOnce(&mut Task, &dyn IdGenerator) -> bool,
{
    let ids = context.ids;
    let task = context.tasks.iter_mut().find(|task| task.id == task_id)?;
    let changed = f(task, ids);
    let snapshot = task.clone();
    if changed {
        context.mark_dirty();
    }
    Some(snapshot)
}
