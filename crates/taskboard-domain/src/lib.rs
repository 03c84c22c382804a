pub mod checklist;
pub mod comment;
pub mod commands;
pub mod image;
pub mod operations;
pub mod task;
pub mod view;

pub use checklist::{ChecklistItem, ChecklistItemId};
pub use comment::{Comment, CommentId};
pub use image::{ImageAttachment, ImageId};
pub use operations::TaskBoardOperations;
pub use task::{Task, TaskId, TaskStatus, Transition};
pub use view::{BoardView, BucketCounts, CardAction, CardView, ColumnView, Indicator, ModalView};
