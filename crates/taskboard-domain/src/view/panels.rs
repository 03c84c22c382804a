use super::card::Indicator;
use crate::{ChecklistItemId, CommentId, ImageId, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow {
    pub id: ChecklistItemId,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistPanel {
    pub rows: Vec<ChecklistRow>,
}

impl ChecklistPanel {
    pub const EMPTY_MESSAGE: &'static str = "No checklist items yet";

    pub fn project(task: &Task) -> Self {
        Self {
            rows: task
                .checklist
                .iter()
                .map(|item| ChecklistRow {
                    id: item.id,
                    text: item.text.clone(),
                    completed: item.completed,
                })
                .collect(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(Self::EMPTY_MESSAGE)
    }

    pub fn progress(&self) -> Option<Indicator> {
        if self.rows.is_empty() {
            return None;
        }
        Some(Indicator::Checklist {
            completed: self.rows.iter().filter(|r| r.completed).count(),
            total: self.rows.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageTile {
    pub id: ImageId,
    pub name: String,
    pub media_type: Option<String>,
    pub size_bytes: usize,
    pub data_uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePanel {
    pub tiles: Vec<ImageTile>,
}

impl ImagePanel {
    pub const EMPTY_MESSAGE: &'static str = "No images uploaded yet";

    pub fn project(task: &Task) -> Self {
        Self {
            tiles: task
                .images
                .iter()
                .map(|image| ImageTile {
                    id: image.id,
                    name: image.name.clone(),
                    media_type: image.media_type().map(str::to_string),
                    size_bytes: image.approx_size_bytes(),
                    data_uri: image.data.clone(),
                })
                .collect(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.tiles.is_empty().then_some(Self::EMPTY_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: CommentId,
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPanel {
    pub rows: Vec<CommentRow>,
}

impl CommentPanel {
    pub const EMPTY_MESSAGE: &'static str = "No comments yet";

    pub fn project(task: &Task) -> Self {
        Self {
            rows: task
                .comments
                .iter()
                .map(|comment| CommentRow {
                    id: comment.id,
                    date: comment.date.clone(),
                    text: comment.text.clone(),
                })
                .collect(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(Self::EMPTY_MESSAGE)
    }
}

/// The edit dialog for one task. Each panel is replaced on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub checklist: ChecklistPanel,
    pub images: ImagePanel,
    pub comments: CommentPanel,
}

impl ModalView {
    pub fn project(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.text.clone(),
            description: task.description.clone(),
            checklist: ChecklistPanel::project(task),
            images: ImagePanel::project(task),
            comments: CommentPanel::project(task),
        }
    }

    pub fn render_checklist(&mut self, task: &Task) {
        self.checklist = ChecklistPanel::project(task);
    }

    pub fn render_images(&mut self, task: &Task) {
        self.images = ImagePanel::project(task);
    }

    pub fn render_comments(&mut self, task: &Task) {
        self.comments = CommentPanel::project(task);
    }
}
