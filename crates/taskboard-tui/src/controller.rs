use crate::services::ImageDecoder;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{
    BoardView, ChecklistItemId, CommentId, ImageId, ModalView, Task, TaskBoardOperations, TaskId,
    TaskStatus,
};

/// What an action did, for the app to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerOutcome {
    Changed,
    /// Unknown id, blank nested text or no open modal.
    Unchanged,
    /// Blocking message the user has to dismiss.
    Alert(String),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub attached: usize,
    pub skipped: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum Panel {
    Description,
    Checklist,
    Images,
    Comments,
}

/// Turns user actions into repository mutations and keeps the retained view
/// fragments in step, replacing only what an action touched.
pub struct Controller<O, D> {
    ops: O,
    decoder: D,
    board: BoardView,
    modal: Option<ModalView>,
}

impl<O: TaskBoardOperations, D: ImageDecoder> Controller<O, D> {
    /// Build the board from whatever is stored.
    pub async fn load(ops: O, decoder: D) -> TaskboardResult<Self> {
        let tasks = ops.list_tasks().await?;
        tracing::info!("Loaded {} tasks", tasks.len());
        Ok(Self {
            board: BoardView::from_tasks(&tasks),
            ops,
            decoder,
            modal: None,
        })
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn modal(&self) -> Option<&ModalView> {
        self.modal.as_ref()
    }

    pub fn operations(&self) -> &O {
        &self.ops
    }

    pub fn modal_task_id(&self) -> Option<TaskId> {
        self.modal.as_ref().map(|modal| modal.task_id)
    }

    /// Rebuild every fragment from storage, picking up changes made elsewhere.
    pub async fn reload(&mut self) -> ControllerOutcome {
        let tasks = match self.ops.list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => return failed("reload", e),
        };
        let in_transit = self.board.in_transit();
        self.board = BoardView::from_tasks(&tasks);
        if in_transit.is_some_and(|id| self.board.card(id).is_some()) {
            self.board.set_in_transit(in_transit);
        }
        if let Some(id) = self.modal_task_id() {
            self.modal = tasks.iter().find(|t| t.id == id).map(ModalView::project);
        }
        ControllerOutcome::Changed
    }

    pub async fn add_task(&mut self, text: &str) -> ControllerOutcome {
        match self.ops.add_task(text).await {
            Ok(task) => {
                self.board.render_card(&task);
                self.refresh_counts().await;
                ControllerOutcome::Changed
            }
            Err(TaskboardError::Validation(message)) => ControllerOutcome::Alert(message),
            Err(e) => failed("add task", e),
        }
    }

    pub async fn move_task(&mut self, id: TaskId, status: TaskStatus) -> ControllerOutcome {
        let result = self.ops.move_task(id, status).await;
        self.apply("move task", result, None).await
    }

    /// Mark a card as picked up. Returns false if there is no such card.
    pub fn pick_up(&mut self, id: TaskId) -> bool {
        if self.board.card(id).is_none() {
            return false;
        }
        self.board.set_in_transit(Some(id));
        true
    }

    pub fn cancel_drag(&mut self) {
        self.board.set_in_transit(None);
    }

    /// Drop the picked-up card on a column. Any column is accepted, including
    /// the one it came from.
    pub async fn drop_on(&mut self, status: TaskStatus) -> ControllerOutcome {
        let Some(id) = self.board.in_transit() else {
            return ControllerOutcome::Unchanged;
        };
        self.board.set_in_transit(None);
        self.move_task(id, status).await
    }

    pub async fn delete_task(&mut self, id: TaskId) -> ControllerOutcome {
        match self.ops.delete_task(id).await {
            Ok(true) => {
                self.board.remove_card(id);
                if self.board.in_transit() == Some(id) {
                    self.board.set_in_transit(None);
                }
                if self.modal_task_id() == Some(id) {
                    self.modal = None;
                }
                self.refresh_counts().await;
                ControllerOutcome::Changed
            }
            Ok(false) => ControllerOutcome::Unchanged,
            Err(e) => failed("delete task", e),
        }
    }

    pub async fn open_modal(&mut self, id: TaskId) -> ControllerOutcome {
        match self.ops.get_task(id).await {
            Ok(Some(task)) => {
                self.modal = Some(ModalView::project(&task));
                ControllerOutcome::Changed
            }
            Ok(None) => ControllerOutcome::Unchanged,
            Err(e) => failed("open task", e),
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub async fn save_description(&mut self, description: &str) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.update_description(id, description).await;
        self.apply("save description", result, Some(Panel::Description))
            .await
    }

    pub async fn add_checklist_item(&mut self, text: &str) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.add_checklist_item(id, text).await;
        self.apply("add checklist item", result, Some(Panel::Checklist))
            .await
    }

    pub async fn toggle_checklist_item(&mut self, item_id: ChecklistItemId) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.toggle_checklist_item(id, item_id).await;
        self.apply("toggle checklist item", result, Some(Panel::Checklist))
            .await
    }

    pub async fn delete_checklist_item(&mut self, item_id: ChecklistItemId) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.delete_checklist_item(id, item_id).await;
        self.apply("delete checklist item", result, Some(Panel::Checklist))
            .await
    }

    /// Decode every file concurrently and attach each one as soon as it is
    /// ready, in completion order. Files that fail to decode are skipped.
    pub async fn upload_images(&mut self, paths: Vec<PathBuf>) -> UploadSummary {
        let mut summary = UploadSummary::default();
        let Some(task_id) = self.modal_task_id() else {
            return summary;
        };

        let decoder = &self.decoder;
        let ops = &self.ops;
        let mut pending: FuturesUnordered<_> = paths
            .into_iter()
            .map(move |path| async move {
                let result = match decoder.decode(&path).await {
                    Ok(image) => ops.add_image(task_id, &image.name, &image.data_uri).await,
                    Err(e) => Err(e),
                };
                (path, result)
            })
            .collect();

        while let Some((path, result)) = pending.next().await {
            match result {
                Ok(Some(task)) => {
                    self.board.render_card(&task);
                    if let Some(modal) = self.modal.as_mut().filter(|m| m.task_id == task.id) {
                        modal.render_images(&task);
                    }
                    summary.attached += 1;
                }
                Ok(None) => summary.skipped.push(path),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped.push(path);
                }
            }
        }
        summary
    }

    pub async fn delete_image(&mut self, image_id: ImageId) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.delete_image(id, image_id).await;
        self.apply("delete image", result, Some(Panel::Images)).await
    }

    pub async fn add_comment(&mut self, text: &str) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.add_comment(id, text).await;
        self.apply("add comment", result, Some(Panel::Comments)).await
    }

    pub async fn delete_comment(&mut self, comment_id: CommentId) -> ControllerOutcome {
        let Some(id) = self.modal_task_id() else {
            return ControllerOutcome::Unchanged;
        };
        let result = self.ops.delete_comment(id, comment_id).await;
        self.apply("delete comment", result, Some(Panel::Comments))
            .await
    }

    async fn apply(
        &mut self,
        action: &str,
        result: TaskboardResult<Option<Task>>,
        panel: Option<Panel>,
    ) -> ControllerOutcome {
        let task = match result {
            Ok(Some(task)) => task,
            Ok(None) => return ControllerOutcome::Unchanged,
            Err(e) => return failed(action, e),
        };

        self.board.render_card(&task);
        if let (Some(panel), Some(modal)) = (
            panel,
            self.modal.as_mut().filter(|m| m.task_id == task.id),
        ) {
            match panel {
                Panel::Description => modal.description = task.description.clone(),
                Panel::Checklist => modal.render_checklist(&task),
                Panel::Images => modal.render_images(&task),
                Panel::Comments => modal.render_comments(&task),
            }
        }
        self.refresh_counts().await;
        ControllerOutcome::Changed
    }

    async fn refresh_counts(&mut self) {
        match self.ops.list_tasks().await {
            Ok(tasks) => self.board.refresh_counts(&tasks),
            Err(e) => tracing::error!("Failed to refresh counts: {}", e),
        }
    }
}

fn failed(action: &str, e: TaskboardError) -> ControllerOutcome {
    tracing::error!("Failed to {}: {}", action, e);
    ControllerOutcome::Failed(e.to_string())
}
