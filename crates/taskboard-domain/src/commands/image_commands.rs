use super::{with_task, Command, CommandContext};
use crate::{ImageAttachment, ImageId, Task, TaskId};
use chrono::Utc;
use taskboard_core::TaskboardResult;

/// Append one decoded image.
pub struct AddImage {
    pub task_id: TaskId,
    pub name: String,
    pub data_uri: String,
}

impl Command for AddImage {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            let id = ImageAttachment::fresh_id(
                Utc::now().timestamp_millis(),
                &task.images,
                &mut rand::thread_rng(),
            );
            task.images.push(ImageAttachment::new(
                id,
                self.name.clone(),
                self.data_uri.clone(),
            ));
            true
        }))
    }

    fn description(&self) -> String {
        format!("Attach '{}' to task {}", self.name, self.task_id)
    }
}

/// Remove every image carrying `image_id`; ids are not guaranteed unique in old data.
pub struct DeleteImage {
    pub task_id: TaskId,
    pub image_id: ImageId,
}

impl Command for DeleteImage {
    type Output = Option<Task>;

    fn execute(&self, context: &mut CommandContext) -> TaskboardResult<Option<Task>> {
        Ok(with_task(context, self.task_id, |task, _| {
            let before = task.images.len();
            task.images.retain(|image| image.id != self.image_id);
            task.images.len() != before
        }))
    }

    fn description(&self) -> String {
        format!("Delete image {} of task {}", self.image_id, self.task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::MonotonicClockIds;

    #[test]
    fn test_add_then_delete_image() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![Task::new(1, "T".to_string())];

        let task = {
            let mut ctx = CommandContext::new(&mut tasks, &ids);
            AddImage {
                task_id: 1,
                name: "a.png".to_string(),
                data_uri: "data:image/png;base64,AA==".to_string(),
            }
            .execute(&mut ctx)
            .unwrap()
            .unwrap()
        };
        assert_eq!(task.images.len(), 1);
        assert_eq!(task.images[0].name, "a.png");

        let image_id = task.images[0].id;
        let mut ctx = CommandContext::new(&mut tasks, &ids);
        let task = DeleteImage { task_id: 1, image_id }
            .execute(&mut ctx)
            .unwrap()
            .unwrap();
        assert!(ctx.is_dirty());
        assert!(task.images.is_empty());
    }

    #[test]
    fn test_add_image_to_missing_task() {
        let ids = MonotonicClockIds::new();
        let mut tasks = vec![];
        let mut ctx = CommandContext::new(&mut tasks, &ids);
        let out = AddImage {
            task_id: 1,
            name: "a.png".to_string(),
            data_uri: String::new(),
        }
        .execute(&mut ctx)
        .unwrap();
        assert!(out.is_none());
        assert!(!ctx.is_dirty());
    }
}
