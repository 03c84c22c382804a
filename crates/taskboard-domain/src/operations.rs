use crate::{
    ChecklistItem, ChecklistItemId, Comment, CommentId, ImageAttachment, ImageId, Task, TaskId,
    TaskStatus,
};
use crate::view::BucketCounts;
use async_trait::async_trait;
use taskboard_core::TaskboardResult;

/// Every operation the board offers on its task collection.
///
/// Both the interactive board and the command line drive the same
/// implementation, so each mutation behaves identically on either surface.
/// Each call is one read-modify-write of the whole stored collection.
///
/// Lookup misses are not errors: mutations on an unknown task return `None`
/// (or `false`) and leave storage untouched.
#[async_trait]
pub trait TaskBoardOperations: Send + Sync {
    // Reads
    async fn list_tasks(&self) -> TaskboardResult<Vec<Task>>;
    async fn get_task(&self, id: TaskId) -> TaskboardResult<Option<Task>>;
    async fn bucket_counts(&self) -> TaskboardResult<BucketCounts> {
        Ok(BucketCounts::from_tasks(&self.list_tasks().await?))
    }

    // Task operations
    /// Fails with a validation error when `text` is blank.
    async fn add_task(&self, text: &str) -> TaskboardResult<Task>;
    async fn move_task(&self, id: TaskId, status: TaskStatus) -> TaskboardResult<Option<Task>>;
    async fn delete_task(&self, id: TaskId) -> TaskboardResult<bool>;
    async fn update_description(
        &self,
        id: TaskId,
        description: &str,
    ) -> TaskboardResult<Option<Task>>;

    // Wholesale replacement of nested collections
    async fn replace_checklist(
        &self,
        id: TaskId,
        checklist: Vec<ChecklistItem>,
    ) -> TaskboardResult<Option<Task>>;
    async fn replace_images(
        &self,
        id: TaskId,
        images: Vec<ImageAttachment>,
    ) -> TaskboardResult<Option<Task>>;
    async fn replace_comments(
        &self,
        id: TaskId,
        comments: Vec<Comment>,
    ) -> TaskboardResult<Option<Task>>;

    // Checklist
    /// Blank text is ignored and yields `None`.
    async fn add_checklist_item(&self, id: TaskId, text: &str) -> TaskboardResult<Option<Task>>;
    async fn toggle_checklist_item(
        &self,
        id: TaskId,
        item_id: ChecklistItemId,
    ) -> TaskboardResult<Option<Task>>;
    async fn delete_checklist_item(
        &self,
        id: TaskId,
        item_id: ChecklistItemId,
    ) -> TaskboardResult<Option<Task>>;

    // Images
    async fn add_image(
        &self,
        id: TaskId,
        name: &str,
        data_uri: &str,
    ) -> TaskboardResult<Option<Task>>;
    async fn delete_image(&self, id: TaskId, image_id: ImageId) -> TaskboardResult<Option<Task>>;

    // Comments
    /// Blank text is ignored and yields `None`.
    async fn add_comment(&self, id: TaskId, text: &str) -> TaskboardResult<Option<Task>>;
    async fn delete_comment(
        &self,
        id: TaskId,
        comment_id: CommentId,
    ) -> TaskboardResult<Option<Task>>;
}
