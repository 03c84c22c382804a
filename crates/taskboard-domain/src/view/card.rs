use crate::{Task, TaskId, TaskStatus};
use std::fmt;

/// Summary badge shown on a card. Only produced for non-empty collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Checklist { completed: usize, total: usize },
    Images(usize),
    Comments(usize),
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Checklist { completed, total } => write!(f, "☑ {}/{}", completed, total),
            Indicator::Images(count) => write!(f, "🖼 {}", count),
            Indicator::Comments(count) => write!(f, "💬 {}", count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Move {
        label: &'static str,
        target: TaskStatus,
    },
    Delete,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Edit => "Edit",
            CardAction::Move { label, .. } => *label,
            CardAction::Delete => "Delete",
        }
    }
}

/// One task card as it appears in its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TaskId,
    pub text: String,
    pub status: TaskStatus,
    pub indicators: Vec<Indicator>,
    pub actions: Vec<CardAction>,
    pub in_transit: bool,
}

impl CardView {
    pub fn project(task: &Task) -> Self {
        let mut indicators = Vec::new();
        if !task.checklist.is_empty() {
            let (completed, total) = task.checklist_progress();
            indicators.push(Indicator::Checklist { completed, total });
        }
        if !task.images.is_empty() {
            indicators.push(Indicator::Images(task.images.len()));
        }
        if !task.comments.is_empty() {
            indicators.push(Indicator::Comments(task.comments.len()));
        }

        let mut actions = vec![CardAction::Edit];
        actions.extend(
            task.status
                .transitions()
                .iter()
                .map(|t| CardAction::Move {
                    label: t.label,
                    target: t.target,
                }),
        );
        actions.push(CardAction::Delete);

        Self {
            id: task.id,
            text: task.text.clone(),
            status: task.status,
            indicators,
            actions,
            in_transit: false,
        }
    }

    pub fn checklist_indicator(&self) -> Option<String> {
        self.indicators
            .iter()
            .find(|i| matches!(i, Indicator::Checklist { .. }))
            .map(|i| i.to_string())
    }
}
