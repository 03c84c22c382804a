use super::card::CardView;
use crate::{Task, TaskId, TaskStatus};
use serde::Serialize;

/// Number of tasks per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub todo: usize,
    #[serde(rename = "inprogress")]
    pub in_progress: usize,
    pub done: usize,
}

impl BucketCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            *counts.get_mut(task.status) += 1;
            counts
        })
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }

    fn get_mut(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }
}

/// The cards of one status bucket, in the order they were rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn new(status: TaskStatus) -> Self {
        Self {
            status,
            cards: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Placeholder shown instead of cards while the column is empty.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.cards.is_empty() {
            return None;
        }
        Some(match self.status {
            TaskStatus::Todo => "No tasks in To Do",
            TaskStatus::InProgress => "No tasks in progress",
            TaskStatus::Done => "No completed tasks",
        })
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

/// Retained card fragments for the three columns.
///
/// Fragments are replaced one at a time: re-rendering a task drops its old
/// card wherever it is and appends a fresh one to the end of its bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    columns: [ColumnView; 3],
    counts: BucketCounts,
    in_transit: Option<TaskId>,
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::ALL.map(ColumnView::new),
            counts: BucketCounts::default(),
            in_transit: None,
        }
    }

    /// Build the board in stored order. Every stored task gets a card, even
    /// when older data repeats an id, so the cards agree with the counts.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut board = Self::new();
        for task in tasks {
            board.columns[task.status.index()]
                .cards
                .push(CardView::project(task));
        }
        board.refresh_counts(tasks);
        board
    }

    pub fn columns(&self) -> &[ColumnView; 3] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &ColumnView {
        &self.columns[status.index()]
    }

    pub fn counts(&self) -> BucketCounts {
        self.counts
    }

    /// Recount from the stored collection; the board's own cards are not trusted for this.
    pub fn refresh_counts(&mut self, tasks: &[Task]) {
        self.counts = BucketCounts::from_tasks(tasks);
    }

    /// Replace the fragment for `task`, appending it to its bucket.
    pub fn render_card(&mut self, task: &Task) {
        self.remove_card(task.id);
        let mut card = CardView::project(task);
        card.in_transit = self.in_transit == Some(task.id);
        self.columns[task.status.index()].cards.push(card);
    }

    /// Drop the fragment for `id`. Returns whether one existed.
    pub fn remove_card(&mut self, id: TaskId) -> bool {
        let mut removed = false;
        for column in &mut self.columns {
            let before = column.cards.len();
            column.cards.retain(|card| card.id != id);
            removed |= column.cards.len() != before;
        }
        removed
    }

    pub fn card(&self, id: TaskId) -> Option<&CardView> {
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| card.id == id)
    }

    /// Column and position of a card.
    pub fn locate(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns
            .iter()
            .find_map(|column| column.position(id).map(|pos| (column.status, pos)))
    }

    pub fn in_transit(&self) -> Option<TaskId> {
        self.in_transit
    }

    /// Mark one card as picked up (or none). Only the flag on the affected
    /// cards changes.
    pub fn set_in_transit(&mut self, id: Option<TaskId>) {
        self.in_transit = id;
        for card in self.columns.iter_mut().flat_map(|c| c.cards.iter_mut()) {
            card.in_transit = Some(card.id) == id;
        }
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, status: TaskStatus) -> Task {
        let mut task = Task::new(id, format!("Task {}", id));
        task.move_to(status);
        task
    }

    fn ids(column: &ColumnView) -> Vec<TaskId> {
        column.cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_empty_board_shows_placeholders() {
        let board = BoardView::new();
        let messages: Vec<_> = board
            .columns()
            .iter()
            .map(|c| c.empty_message())
            .collect();
        assert_eq!(
            messages,
            vec![
                Some("No tasks in To Do"),
                Some("No tasks in progress"),
                Some("No completed tasks")
            ]
        );
        assert_eq!(board.counts().total(), 0);
    }

    #[test]
    fn test_from_tasks_buckets_in_stored_order() {
        let tasks = vec![
            task(1, TaskStatus::Done),
            task(2, TaskStatus::Todo),
            task(3, TaskStatus::Todo),
        ];
        let board = BoardView::from_tasks(&tasks);
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![2, 3]);
        assert_eq!(ids(board.column(TaskStatus::Done)), vec![1]);
        assert_eq!(board.column(TaskStatus::Todo).empty_message(), None);
        assert_eq!(
            board.column(TaskStatus::InProgress).empty_message(),
            Some("No tasks in progress")
        );
        assert_eq!(board.counts().todo, 2);
        assert_eq!(board.counts().done, 1);
    }

    #[test]
    fn test_repeated_stored_ids_keep_cards_and_counts_in_step() {
        let tasks = vec![
            task(7, TaskStatus::Todo),
            task(7, TaskStatus::Todo),
            task(8, TaskStatus::Done),
        ];
        let board = BoardView::from_tasks(&tasks);

        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![7, 7]);
        assert_eq!(board.counts().todo, 2);
        assert_eq!(board.card_count(), board.counts().total());
    }

    #[test]
    fn test_rerender_appends_to_end_of_destination() {
        let mut tasks = vec![
            task(1, TaskStatus::Todo),
            task(2, TaskStatus::InProgress),
            task(3, TaskStatus::Todo),
        ];
        let mut board = BoardView::from_tasks(&tasks);

        // Re-rendering in place still moves the card to the end of its bucket
        board.render_card(&tasks[0]);
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![3, 1]);

        tasks[2].move_to(TaskStatus::InProgress);
        board.render_card(&tasks[2]);
        assert_eq!(ids(board.column(TaskStatus::Todo)), vec![1]);
        assert_eq!(ids(board.column(TaskStatus::InProgress)), vec![2, 3]);
        assert_eq!(board.card_count(), 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let tasks = vec![task(1, TaskStatus::Todo)];
        let mut board = BoardView::from_tasks(&tasks);
        let before = board.clone();
        board.render_card(&tasks[0]);
        board.render_card(&tasks[0]);
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_card() {
        let tasks = vec![task(1, TaskStatus::Todo)];
        let mut board = BoardView::from_tasks(&tasks);
        assert!(board.remove_card(1));
        assert!(!board.remove_card(1));
        assert_eq!(
            board.column(TaskStatus::Todo).empty_message(),
            Some("No tasks in To Do")
        );
    }

    #[test]
    fn test_in_transit_survives_rerender() {
        let mut tasks = vec![task(1, TaskStatus::Todo), task(2, TaskStatus::Todo)];
        let mut board = BoardView::from_tasks(&tasks);
        board.set_in_transit(Some(1));
        assert!(board.card(1).unwrap().in_transit);
        assert!(!board.card(2).unwrap().in_transit);

        tasks[0].move_to(TaskStatus::Done);
        board.render_card(&tasks[0]);
        assert!(board.card(1).unwrap().in_transit);
        assert_eq!(board.locate(1), Some((TaskStatus::Done, 0)));

        board.set_in_transit(None);
        assert!(!board.card(1).unwrap().in_transit);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let tasks = vec![
            task(1, TaskStatus::Todo),
            task(2, TaskStatus::InProgress),
            task(3, TaskStatus::Done),
            task(4, TaskStatus::Done),
        ];
        let counts = BucketCounts::from_tasks(&tasks);
        assert_eq!(counts.total(), tasks.len());
        assert_eq!(counts.get(TaskStatus::Done), 2);
    }
}
