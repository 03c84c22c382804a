use serde::{Deserialize, Serialize};

pub type CommentId = i64;

/// An entry in a task's comment log. `date` is rendered once, when the
/// comment is written, and never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    #[serde(default)]
    pub date: String,
}

impl Comment {
    pub fn new(id: CommentId, text: String, date: String) -> Self {
        Self { id, text, date }
    }
}
