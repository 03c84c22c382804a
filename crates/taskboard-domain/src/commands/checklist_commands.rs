use super::{with_task, Command, CommandContext};
use crate::{ChecklistItem, ChecklistItemId, Task, TaskId};
use taskboard_core::TaskboardResult;

/// Append a checklist item. Blank text is silently ignored.
pub struct AddChecklistItem {
    pub task_id: TaskId,
    pub text: String,
}

impl Command for AddChecklistItem {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        let text = self.text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(with_task(context, self.task_id, |task, ids| {
            task.checklist
                .push(ChecklistItem::new(ids.next_id(), text.to_string()));
            true
        }))
    }

    fn description(&self) -> String {
        format!("Add checklist item to task {}", self.task_id)
    }
}

/// Flip the completed flag of one checklist item.
pub struct ToggleChecklistItem {
    pub task_id: TaskId,
    pub item_id: ChecklistItemId,
}

impl Command for ToggleChecklistItem {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            match task.checklist_item_mut(self.item_id) {
                Some(item) => {
                    item.toggle();
                    true
                }
                None => false,
            }
        }))
    }

    fn description(&self) -> String {
        format!(
            "Toggle checklist item {} of task {}",
            self.item_id, self.task_id
        )
    }
}

pub struct DeleteChecklistItem {
    pub task_id: TaskId,
    pub item_id: ChecklistItemId,
}

impl Command for DeleteChecklistItem {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            let before = task.checklist.len();
            task.checklist.retain(|item| item.id != self.item_id);
            task.checklist.len() != before
        }))
    }

    fn description(&self) -> String {
        format!(
            "Delete checklist item {} of task {}",
            self.item_id, self.task_id
        )
    }
}
