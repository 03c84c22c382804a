use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{checklist::ChecklistItem, comment::Comment, image::ImageAttachment};

pub type TaskId = i64;

/// The three fixed stages of the board.
///
/// Stored as `"todo"`, `"inprogress"` and `"done"`. Any other stored value is
/// read back as `Todo` so that a damaged entry still lands in a column. A
/// missing or `null` status counts as unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// A status change offered as a button on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub label: &'static str,
    pub target: TaskStatus,
}

const TODO_TRANSITIONS: &[Transition] = &[Transition {
    label: "Start",
    target: TaskStatus::InProgress,
}];

const IN_PROGRESS_TRANSITIONS: &[Transition] = &[
    Transition {
        label: "To Do",
        target: TaskStatus::Todo,
    },
    Transition {
        label: "Done",
        target: TaskStatus::Done,
    },
];

const DONE_TRANSITIONS: &[Transition] = &[Transition {
    label: "Reopen",
    target: TaskStatus::Todo,
}];

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Column position, left to right.
    pub fn index(self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Moves a card in this status offers. There is no direct todo -> done.
    pub fn transitions(self) -> &'static [Transition] {
        match self {
            TaskStatus::Todo => TODO_TRANSITIONS,
            TaskStatus::InProgress => IN_PROGRESS_TRANSITIONS,
            TaskStatus::Done => DONE_TRANSITIONS,
        }
    }
}

impl From<Option<String>> for TaskStatus {
    fn from(value: Option<String>) -> Self {
        value
            .and_then(|status| status.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" | "to-do" => Ok(TaskStatus::Todo),
            "inprogress" | "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown status '{}', expected todo, inprogress or done",
                other
            )),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    pub fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            status: TaskStatus::Todo,
            description: String::new(),
            checklist: Vec::new(),
            images: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn move_to(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub fn update_description(&mut self, description: String) {
        self.description = description;
    }

    /// Completed and total checklist items.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let completed = self.checklist.iter().filter(|item| item.completed).count();
        (completed, self.checklist.len())
    }

    pub fn checklist_item_mut(&mut self, item_id: i64) -> Option<&mut ChecklistItem> {
        self.checklist.iter_mut().find(|item| item.id == item_id)
    }

    /// Largest id used anywhere inside this task, including the task itself.
    pub fn max_id(&self) -> i64 {
        self.checklist
            .iter()
            .map(|item| item.id)
            .chain(self.comments.iter().map(|comment| comment.id))
            .fold(self.id, i64::max)
    }
}
