use crate::{
    controller::{Controller, ControllerOutcome, UploadSummary},
    dialog::{handle_dialog_input, DialogAction},
    editor::edit_in_external_editor,
    events::{should_quit, Event, EventHandler},
    input::InputState,
    selection::SelectionState,
    services::ImageDecoder,
    ui,
};
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use taskboard_domain::{CardAction, CardView, TaskBoardOperations, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Board,
    AddTask,
    Modal,
    AddChecklistItem,
    AddComment,
    AttachImages,
}

/// Region of the task modal that keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSection {
    Description,
    Checklist,
    Images,
    Comments,
}

impl ModalSection {
    pub const ALL: [ModalSection; 4] = [
        ModalSection::Description,
        ModalSection::Checklist,
        ModalSection::Images,
        ModalSection::Comments,
    ];

    pub fn next(self) -> Self {
        match self {
            ModalSection::Description => ModalSection::Checklist,
            ModalSection::Checklist => ModalSection::Images,
            ModalSection::Images => ModalSection::Comments,
            ModalSection::Comments => ModalSection::Description,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ModalSection::Description => "Description",
            ModalSection::Checklist => "Checklist",
            ModalSection::Images => "Images",
            ModalSection::Comments => "Comments",
        }
    }
}

/// Work the event loop has to do outside of key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppRequest {
    EditDescription,
}

/// Key that triggers a card's move button: the first letter of its label.
pub fn action_key(label: &str) -> char {
    label
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or(' ')
}

pub struct App<O, D> {
    pub should_quit: bool,
    pub mode: AppMode,
    pub input: InputState,
    pub controller: Controller<O, D>,
    pub focused_column: TaskStatus,
    pub card_selection: [SelectionState; 3],
    pub modal_section: ModalSection,
    pub modal_selection: SelectionState,
    pub alert: Option<String>,
    pub status_message: Option<String>,
}

impl<O: TaskBoardOperations, D: ImageDecoder> App<O, D> {
    pub fn new(controller: Controller<O, D>) -> Self {
        let mut app = Self {
            should_quit: false,
            mode: AppMode::Board,
            input: InputState::new(),
            controller,
            focused_column: TaskStatus::Todo,
            card_selection: [SelectionState::new(); 3],
            modal_section: ModalSection::Description,
            modal_selection: SelectionState::new(),
            alert: None,
            status_message: None,
        };
        app.clamp_selections();
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        let column = self.controller.board().column(self.focused_column);
        self.card_selection[self.focused_column.index()]
            .get()
            .and_then(|idx| column.cards.get(idx))
    }

    fn selected_card_id(&self) -> Option<TaskId> {
        self.selected_card().map(|card| card.id)
    }

    fn section_len(&self) -> usize {
        let Some(modal) = self.controller.modal() else {
            return 0;
        };
        match self.modal_section {
            ModalSection::Description => 0,
            ModalSection::Checklist => modal.checklist.rows.len(),
            ModalSection::Images => modal.images.tiles.len(),
            ModalSection::Comments => modal.comments.rows.len(),
        }
    }

    fn clamp_selections(&mut self) {
        for status in TaskStatus::ALL {
            let len = self.controller.board().column(status).cards.len();
            self.card_selection[status.index()].clamp(len);
        }
        let len = self.section_len();
        self.modal_selection.clamp(len);
    }

    fn report(&mut self, outcome: ControllerOutcome) {
        match outcome {
            ControllerOutcome::Alert(message) => self.alert = Some(message),
            ControllerOutcome::Failed(message) => self.status_message = Some(message),
            ControllerOutcome::Changed | ControllerOutcome::Unchanged => {}
        }
        self.clamp_selections();
    }

    fn report_upload(&mut self, summary: UploadSummary) {
        self.status_message = Some(if summary.skipped.is_empty() {
            format!("Attached {} image(s)", summary.attached)
        } else {
            format!(
                "Attached {} image(s), skipped {}",
                summary.attached,
                summary.skipped.len()
            )
        });
        self.clamp_selections();
    }

    fn focus_column(&mut self, status: TaskStatus) {
        self.focused_column = status;
        let len = self.controller.board().column(status).cards.len();
        self.card_selection[status.index()].clamp(len);
    }

    /// Follow a card to wherever it was re-rendered.
    fn follow_card(&mut self, id: TaskId) {
        if let Some((status, position)) = self.controller.board().locate(id) {
            self.focused_column = status;
            self.card_selection[status.index()].set(Some(position));
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Option<AppRequest> {
        if self.alert.take().is_some() {
            return None;
        }
        self.status_message = None;

        match self.mode {
            AppMode::Board => return self.handle_board_key(key).await,
            AppMode::Modal => return self.handle_modal_key(key).await,
            AppMode::AddTask
            | AppMode::AddChecklistItem
            | AppMode::AddComment
            | AppMode::AttachImages => self.handle_prompt_key(key).await,
        }
        None
    }

    async fn handle_board_key(&mut self, key: KeyEvent) -> Option<AppRequest> {
        if should_quit(&key) {
            self.quit();
            return None;
        }

        let column = self.focused_column.index();
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('a') => {
                self.input.clear();
                self.mode = AppMode::AddTask;
            }
            KeyCode::Char('h') | KeyCode::Left => {
                let prev = TaskStatus::from_index(column.saturating_sub(1));
                self.focus_column(prev.unwrap_or(TaskStatus::Todo));
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let next = TaskStatus::from_index(column + 1);
                self.focus_column(next.unwrap_or(TaskStatus::Done));
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.controller.board().column(self.focused_column).cards.len();
                self.card_selection[column].next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => self.card_selection[column].prev(),
            KeyCode::Char('m') => {
                if self.controller.board().in_transit().is_some() {
                    let outcome = self.controller.drop_on(self.focused_column).await;
                    self.report(outcome);
                } else if let Some(id) = self.selected_card_id() {
                    self.controller.pick_up(id);
                }
            }
            KeyCode::Esc => self.controller.cancel_drag(),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.selected_card_id() {
                    let outcome = self.controller.open_modal(id).await;
                    if self.controller.modal().is_some() {
                        self.mode = AppMode::Modal;
                        self.modal_section = ModalSection::Description;
                        self.modal_selection = SelectionState::new();
                    }
                    self.report(outcome);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(id) = self.selected_card_id() {
                    let outcome = self.controller.delete_task(id).await;
                    self.report(outcome);
                }
            }
            KeyCode::Char('R') => {
                let outcome = self.controller.reload().await;
                self.report(outcome);
            }
            KeyCode::Char(c) => {
                let target = self.selected_card().and_then(|card| {
                    card.actions.iter().find_map(|action| match action {
                        CardAction::Move { label, target } if action_key(label) == c => {
                            Some((card.id, *target))
                        }
                        _ => None,
                    })
                });
                if let Some((id, status)) = target {
                    let outcome = self.controller.move_task(id, status).await;
                    self.report(outcome);
                    self.follow_card(id);
                }
            }
            _ => {}
        }
        None
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) -> Option<AppRequest> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.controller.close_modal();
                self.mode = AppMode::Board;
                self.clamp_selections();
            }
            KeyCode::Tab => {
                self.modal_section = self.modal_section.next();
                self.modal_selection = SelectionState::new();
                self.clamp_selections();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.section_len();
                self.modal_selection.next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => self.modal_selection.prev(),
            KeyCode::Char('e') if self.modal_section == ModalSection::Description => {
                return Some(AppRequest::EditDescription);
            }
            KeyCode::Char('a') => {
                self.input.clear();
                self.mode = match self.modal_section {
                    ModalSection::Description => return Some(AppRequest::EditDescription),
                    ModalSection::Checklist => AppMode::AddChecklistItem,
                    ModalSection::Images => AppMode::AttachImages,
                    ModalSection::Comments => AppMode::AddComment,
                };
            }
            KeyCode::Char(' ') | KeyCode::Enter
                if self.modal_section == ModalSection::Checklist =>
            {
                let item = self.controller.modal().and_then(|modal| {
                    self.modal_selection
                        .get()
                        .and_then(|idx| modal.checklist.rows.get(idx))
                        .map(|row| row.id)
                });
                if let Some(item_id) = item {
                    let outcome = self.controller.toggle_checklist_item(item_id).await;
                    self.report(outcome);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected_entry().await,
            _ => {}
        }
        None
    }

    async fn delete_selected_entry(&mut self) {
        let (Some(modal), Some(idx)) = (self.controller.modal(), self.modal_selection.get())
        else {
            return;
        };
        let outcome = match self.modal_section {
            ModalSection::Description => return,
            ModalSection::Checklist => match modal.checklist.rows.get(idx).map(|r| r.id) {
                Some(id) => self.controller.delete_checklist_item(id).await,
                None => return,
            },
            ModalSection::Images => match modal.images.tiles.get(idx).map(|t| t.id) {
                Some(id) => self.controller.delete_image(id).await,
                None => return,
            },
            ModalSection::Comments => match modal.comments.rows.get(idx).map(|r| r.id) {
                Some(id) => self.controller.delete_comment(id).await,
                None => return,
            },
        };
        self.report(outcome);
    }

    async fn handle_prompt_key(&mut self, key: KeyEvent) {
        let back_to = if self.mode == AppMode::AddTask {
            AppMode::Board
        } else {
            AppMode::Modal
        };

        match handle_dialog_input(&mut self.input, key) {
            DialogAction::None => {}
            DialogAction::Cancel => {
                self.input.clear();
                self.mode = back_to;
            }
            DialogAction::Confirm => {
                let text = self.input.take();
                let mode = self.mode;
                self.mode = back_to;
                match mode {
                    AppMode::AddTask => {
                        let outcome = self.controller.add_task(&text).await;
                        let alerted = matches!(outcome, ControllerOutcome::Alert(_));
                        self.report(outcome);
                        if alerted {
                            // Keep the prompt open for another try
                            self.mode = AppMode::AddTask;
                        } else {
                            let newest = self
                                .controller
                                .board()
                                .column(TaskStatus::Todo)
                                .cards
                                .last()
                                .map(|card| card.id);
                            if let Some(id) = newest {
                                self.follow_card(id);
                            }
                        }
                    }
                    AppMode::AddChecklistItem => {
                        let outcome = self.controller.add_checklist_item(&text).await;
                        self.report(outcome);
                    }
                    AppMode::AddComment => {
                        let outcome = self.controller.add_comment(&text).await;
                        self.report(outcome);
                    }
                    AppMode::AttachImages => {
                        let paths = parse_paths(&text);
                        if !paths.is_empty() {
                            let summary = self.controller.upload_images(paths).await;
                            self.report_upload(summary);
                        }
                    }
                    AppMode::Board | AppMode::Modal => {}
                }
            }
        }
    }

    async fn edit_description(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        let Some(modal) = self.controller.modal() else {
            return Ok(());
        };
        let temp_file =
            std::env::temp_dir().join(format!("taskboard-task-{}-description.md", modal.task_id));
        let current = modal.description.clone();

        match edit_in_external_editor(terminal, events, &temp_file, &current) {
            Ok(Some(edited)) => {
                let edited = edited.trim_end_matches('\n');
                if edited != current {
                    let outcome = self.controller.save_description(edited).await;
                    self.report(outcome);
                }
            }
            Ok(None) => {}
            Err(e) => self.status_message = Some(e.to_string()),
        }
        Ok(())
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => {
                    if let Some(AppRequest::EditDescription) = self.handle_key(key).await {
                        self.edit_description(terminal, &events).await?;
                        // The editor stopped the poller
                        events = EventHandler::new();
                    }
                }
                Some(Event::Resize) | Some(Event::Tick) => {}
                None => break,
            }
        }
        events.stop();
        Ok(())
    }
}

/// Comma-separated list of file paths.
fn parse_paths(text: &str) -> Vec<PathBuf> {
    text.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FileDataUriDecoder;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;
    use taskboard_persistence::{MemoryStore, TaskRepository};

    type TestApp = App<TaskRepository<Arc<MemoryStore>>, FileDataUriDecoder>;

    async fn app() -> TestApp {
        let repo = TaskRepository::new(Arc::new(MemoryStore::new()));
        App::new(Controller::load(repo, FileDataUriDecoder).await.unwrap())
    }

    async fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).await;
    }

    async fn type_text(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    async fn add_task(app: &mut TestApp, text: &str) {
        press(app, KeyCode::Char('n')).await;
        type_text(app, text).await;
        press(app, KeyCode::Enter).await;
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(action_key("Start"), 's');
        assert_eq!(action_key("To Do"), 't');
        assert_eq!(action_key("Done"), 'd');
        assert_eq!(action_key("Reopen"), 'r');
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(
            parse_paths(" a.png, ,dir/b c.jpg "),
            vec![PathBuf::from("a.png"), PathBuf::from("dir/b c.jpg")]
        );
    }

    #[tokio::test]
    async fn test_add_task_from_prompt() {
        let mut app = app().await;
        add_task(&mut app, "Buy milk").await;

        assert_eq!(app.mode, AppMode::Board);
        assert_eq!(app.selected_card().unwrap().text, "Buy milk");
    }

    #[tokio::test]
    async fn test_blank_task_alerts_and_any_key_dismisses() {
        let mut app = app().await;
        add_task(&mut app, "  ").await;

        assert_eq!(app.alert.as_deref(), Some("Please enter a task!"));
        assert_eq!(app.mode, AppMode::AddTask);

        press(&mut app, KeyCode::Char('z')).await;
        assert!(app.alert.is_none());
        assert_eq!(app.input.as_str(), "");
    }

    #[tokio::test]
    async fn test_card_buttons_follow_the_card() {
        let mut app = app().await;
        add_task(&mut app, "Buy milk").await;

        // todo offers no direct jump to done
        press(&mut app, KeyCode::Char('d')).await;
        assert_eq!(app.focused_column, TaskStatus::Todo);

        press(&mut app, KeyCode::Char('s')).await;
        assert_eq!(app.focused_column, TaskStatus::InProgress);
        press(&mut app, KeyCode::Char('d')).await;
        assert_eq!(app.focused_column, TaskStatus::Done);
        press(&mut app, KeyCode::Char('r')).await;
        assert_eq!(app.focused_column, TaskStatus::Todo);
        assert_eq!(app.controller.board().counts().todo, 1);
    }

    #[tokio::test]
    async fn test_pick_up_and_drop() {
        let mut app = app().await;
        add_task(&mut app, "A").await;

        press(&mut app, KeyCode::Char('m')).await;
        assert!(app.controller.board().in_transit().is_some());
        press(&mut app, KeyCode::Char('l')).await;
        press(&mut app, KeyCode::Char('l')).await;
        press(&mut app, KeyCode::Char('m')).await;

        assert_eq!(app.controller.board().in_transit(), None);
        assert_eq!(app.controller.board().counts().done, 1);
    }

    #[tokio::test]
    async fn test_modal_checklist_flow() {
        let mut app = app().await;
        add_task(&mut app, "Pack").await;

        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.mode, AppMode::Modal);

        press(&mut app, KeyCode::Tab).await;
        assert_eq!(app.modal_section, ModalSection::Checklist);
        press(&mut app, KeyCode::Char('a')).await;
        type_text(&mut app, "A").await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.mode, AppMode::Modal);

        press(&mut app, KeyCode::Char(' ')).await;
        let card = app.controller.board().column(TaskStatus::Todo).cards[0].clone();
        assert_eq!(card.checklist_indicator().as_deref(), Some("☑ 1/1"));

        press(&mut app, KeyCode::Char('x')).await;
        assert!(app.controller.modal().unwrap().checklist.rows.is_empty());

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.mode, AppMode::Board);
        assert!(app.controller.modal().is_none());
    }

    #[tokio::test]
    async fn test_delete_selected_card() {
        let mut app = app().await;
        add_task(&mut app, "A").await;
        add_task(&mut app, "B").await;

        press(&mut app, KeyCode::Char('x')).await;
        let todo = &app.controller.board().column(TaskStatus::Todo).cards;
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].text, "A");
        assert_eq!(app.selected_card().unwrap().text, "A");
    }
}
