use crate::gateway::StorageGateway;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use taskboard_core::{
    AppConfig, IdGenerator, MonotonicClockIds, TaskboardResult, DEFAULT_COMMENT_DATE_FORMAT,
};
use taskboard_domain::commands::*;
use taskboard_domain::{
    ChecklistItem, ChecklistItemId, Comment, CommentId, ImageAttachment, ImageId, Task, TaskId,
    TaskBoardOperations, TaskStatus,
};
use tokio::sync::Mutex;

type CommentClock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// The task collection, persisted through a [`StorageGateway`].
///
/// Nothing is cached: every operation loads the full collection, applies one
/// command and, if the command changed anything, saves the full collection.
/// Cycles are serialized so concurrent callers (for example several image
/// decodes finishing together) always build on each other's writes.
pub struct TaskRepository<S> {
    gateway: StorageGateway<S>,
    ids: Box<dyn IdGenerator>,
    comment_date_format: String,
    comment_clock: CommentClock,
    cycle: Mutex<()>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::from_gateway(StorageGateway::new(store))
    }

    /// Repository honoring the configured storage key and comment date format.
    pub fn with_config(store: S, config: &AppConfig) -> Self {
        let mut repository =
            Self::from_gateway(StorageGateway::with_key(store, config.effective_storage_key()));
        repository.comment_date_format =
            checked_date_format(config.effective_comment_date_format()).to_string();
        repository
    }

    pub fn from_gateway(gateway: StorageGateway<S>) -> Self {
        Self {
            gateway,
            ids: Box::new(MonotonicClockIds::new()),
            comment_date_format: DEFAULT_COMMENT_DATE_FORMAT.to_string(),
            comment_clock: Box::new(Local::now),
            cycle: Mutex::new(()),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_comment_clock(
        mut self,
        clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static,
    ) -> Self {
        self.comment_clock = Box::new(clock);
        self
    }

    pub fn gateway(&self) -> &StorageGateway<S> {
        &self.gateway
    }

    /// One read-modify-write cycle.
    pub async fn execute<C: Command>(&self, command: C) -> TaskboardResult<C::Output> {
        let _cycle = self.cycle.lock().await;

        let mut tasks = self.gateway.load().await?;
        if let Some(max_id) = tasks.iter().map(Task::max_id).max() {
            self.ids.observe(max_id);
        }

        let (output, dirty) = {
            let mut context = CommandContext::new(&mut tasks, self.ids.as_ref());
            let output = command.execute(&mut context)?;
            (output, context.is_dirty())
        };

        if dirty {
            self.gateway.save(tasks).await?;
            tracing::info!("{}", command.description());
        } else {
            tracing::debug!("No change: {}", command.description());
        }
        Ok(output)
    }

    fn comment_date(&self) -> String {
        (self.comment_clock)()
            .format(&self.comment_date_format)
            .to_string()
    }
}

/// The configured format, or the default when it holds a specifier chrono
/// cannot render.
fn checked_date_format(format: &str) -> &str {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        tracing::warn!(
            "Invalid comment_date_format '{}', using '{}'",
            format,
            DEFAULT_COMMENT_DATE_FORMAT
        );
        DEFAULT_COMMENT_DATE_FORMAT
    } else {
        format
    }
}

#[async_trait]
impl<S: KeyValueStore> TaskBoardOperations for TaskRepository<S> {
    async fn list_tasks(&self) -> TaskboardResult<Vec<Task>> {
        self.gateway.load().await
    }

    async fn get_task(&self, id: TaskId) -> TaskboardResult<Option<Task>> {
        Ok(self
            .gateway
            .load()
            .await?
            .into_iter()
            .find(|task| task.id == id))
    }

    async fn add_task(&self, text: &str) -> TaskboardResult<Task> {
        self.execute(CreateTask {
            text: text.to_string(),
        })
        .await
    }

    async fn move_task(&self, id: TaskId, status: TaskStatus) -> TaskboardResult<Option<Task>> {
        self.execute(MoveTask {
            task_id: id,
            status,
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskboardResult<bool> {
        self.execute(DeleteTask { task_id: id }).await
    }

    async fn update_description(
        &self,
        id: TaskId,
        description: &str,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(UpdateDescription {
            task_id: id,
            description: description.to_string(),
        })
        .await
    }

    async fn replace_checklist(
        &self,
        id: TaskId,
        checklist: Vec<ChecklistItem>,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(ReplaceTaskCollection {
            task_id: id,
            collection: ReplaceCollection::Checklist(checklist),
        })
        .await
    }

    async fn replace_images(
        &self,
        id: TaskId,
        images: Vec<ImageAttachment>,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(ReplaceTaskCollection {
            task_id: id,
            collection: ReplaceCollection::Images(images),
        })
        .await
    }

    async fn replace_comments(
        &self,
        id: TaskId,
        comments: Vec<Comment>,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(ReplaceTaskCollection {
            task_id: id,
            collection: ReplaceCollection::Comments(comments),
        })
        .await
    }

    async fn add_checklist_item(&self, id: TaskId, text: &str) -> TaskboardResult<Option<Task>> {
        self.execute(AddChecklistItem {
            task_id: id,
            text: text.to_string(),
        })
        .await
    }

    async fn toggle_checklist_item(
        &self,
        id: TaskId,
        item_id: ChecklistItemId,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(ToggleChecklistItem {
            task_id: id,
            item_id,
        })
        .await
    }

    async fn delete_checklist_item(
        &self,
        id: TaskId,
        item_id: ChecklistItemId,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(DeleteChecklistItem {
            task_id: id,
            item_id,
        })
        .await
    }

    async fn add_image(
        &self,
        id: TaskId,
        name: &str,
        data_uri: &str,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(AddImage {
            task_id: id,
            name: name.to_string(),
            data_uri: data_uri.to_string(),
        })
        .await
    }

    async fn delete_image(&self, id: TaskId, image_id: ImageId) -> TaskboardResult<Option<Task>> {
        self.execute(DeleteImage {
            task_id: id,
            image_id,
        })
        .await
    }

    async fn add_comment(&self, id: TaskId, text: &str) -> TaskboardResult<Option<Task>> {
        let date = self.comment_date();
        self.execute(AddComment {
            task_id: id,
            text: text.to_string(),
            date,
        })
        .await
    }

    async fn delete_comment(
        &self,
        id: TaskId,
        comment_id: CommentId,
    ) -> TaskboardResult<Option<Task>> {
        self.execute(DeleteComment {
            task_id: id,
            comment_id,
        })
        .await
    }
}
