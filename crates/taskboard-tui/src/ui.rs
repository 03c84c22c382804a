use crate::app::{action_key, App, AppMode, ModalSection};
use crate::components::*;
use crate::services::ImageDecoder;
use crate::theme::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use taskboard_domain::{CardAction, CardView, ColumnView, ModalView, TaskBoardOperations, TaskStatus};

pub fn render<O: TaskBoardOperations, D: ImageDecoder>(app: &App<O, D>, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    render_board(app, frame, chunks[0]);
    render_footer(app, frame, chunks[1]);

    if let Some(modal) = app.controller.modal() {
        render_modal(app, modal, frame);
    }

    match app.mode {
        AppMode::AddTask => render_input_popup(frame, " New Task ", "Task:", &app.input),
        AppMode::AddChecklistItem => {
            render_input_popup(frame, " Checklist ", "New item:", &app.input)
        }
        AppMode::AddComment => render_input_popup(frame, " Comment ", "Comment:", &app.input),
        AppMode::AttachImages => render_input_popup(
            frame,
            " Upload Images ",
            "Image files (comma separated):",
            &app.input,
        ),
        AppMode::Board | AppMode::Modal => {}
    }

    if let Some(message) = &app.alert {
        render_alert_popup(frame, message);
    }
}

fn render_board<O: TaskBoardOperations, D: ImageDecoder>(
    app: &App<O, D>,
    frame: &mut Frame,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let board = app.controller.board();
    let counts = board.counts();
    for (column, rect) in board.columns().iter().zip(columns.iter()) {
        let focused = app.mode == AppMode::Board && app.focused_column == column.status;
        let selected = app.card_selection[column.status.index()].get();
        let title = format!(" {} ({}) ", column.title(), counts.get(column.status));
        let panel = PanelConfig::new(title).focused(focused);
        render_panel(
            frame,
            *rect,
            &panel,
            column_content(column, selected, focused),
        );
    }
}

fn column_content(column: &ColumnView, selected: Option<usize>, focused: bool) -> Paragraph<'static> {
    if let Some(message) = column.empty_message() {
        return Paragraph::new(Line::styled(message, label_text()));
    }

    let mut lines = Vec::new();
    for (idx, card) in column.cards.iter().enumerate() {
        let style = if card.in_transit {
            in_transit()
        } else {
            selected_item(focused && selected == Some(idx))
        };
        lines.extend(card_lines(card).into_iter().map(|line| line.patch_style(style)));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn card_lines(card: &CardView) -> Vec<Line<'static>> {
    let text_style = if card.status == TaskStatus::Done {
        done_text()
    } else {
        normal_text()
    };
    let mut lines = vec![Line::styled(card.text.clone(), text_style)];

    if !card.indicators.is_empty() {
        let badges: Vec<Span> = card
            .indicators
            .iter()
            .flat_map(|i| [Span::styled(i.to_string(), indicator()), Span::raw("  ")])
            .collect();
        lines.push(Line::from(badges));
    }

    let hints: Vec<Span> = card
        .actions
        .iter()
        .map(|action| {
            let key = match action {
                CardAction::Edit => 'e',
                CardAction::Move { label, .. } => action_key(label),
                CardAction::Delete => 'x',
            };
            Span::styled(format!("[{}]{} ", key, action.label()), label_text())
        })
        .collect();
    lines.push(Line::from(hints));
    lines
}

fn render_modal<O: TaskBoardOperations, D: ImageDecoder>(
    app: &App<O, D>,
    modal: &ModalView,
    frame: &mut Frame,
) {
    let inner = render_popup_with_block(frame, &format!(" {} ", modal.title), 80, 85);
    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(inner);

    for (section, area) in ModalSection::ALL.into_iter().zip(regions.iter()) {
        let focused = app.mode == AppMode::Modal && app.modal_section == section;
        let selected = focused.then(|| app.modal_selection.get()).flatten();
        let panel = PanelConfig::new(section_title(section, modal)).focused(focused);
        render_panel(frame, *area, &panel, section_content(section, modal, selected));
    }
}

fn section_title(section: ModalSection, modal: &ModalView) -> String {
    match (section, modal.checklist.progress()) {
        (ModalSection::Checklist, Some(progress)) => format!(" Checklist {} ", progress),
        _ => format!(" {} ", section.title()),
    }
}

fn section_content(section: ModalSection, modal: &ModalView, selected: Option<usize>) -> Paragraph<'static> {
    let row_style = |idx: usize| selected_item(selected == Some(idx));

    let lines: Vec<Line> = match section {
        ModalSection::Description if modal.description.is_empty() => {
            vec![Line::styled("Add a more detailed description...", label_text())]
        }
        ModalSection::Description => modal
            .description
            .lines()
            .map(|line| Line::styled(line.to_string(), normal_text()))
            .collect(),
        ModalSection::Checklist => match modal.checklist.empty_message() {
            Some(message) => vec![Line::styled(message, label_text())],
            None => modal
                .checklist
                .rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let (mark, style) = if row.completed {
                        ("[x]", done_text())
                    } else {
                        ("[ ]", normal_text())
                    };
                    Line::styled(format!("{} {}", mark, row.text), style.patch(row_style(idx)))
                })
                .collect(),
        },
        ModalSection::Images => match modal.images.empty_message() {
            Some(message) => vec![Line::styled(message, label_text())],
            None => modal
                .images
                .tiles
                .iter()
                .enumerate()
                .map(|(idx, tile)| {
                    Line::from(vec![
                        Span::styled(tile.name.clone(), normal_text()),
                        Span::styled(
                            format!(
                                "  {} {} KB",
                                tile.media_type.as_deref().unwrap_or("unknown"),
                                tile.size_bytes.div_ceil(1024)
                            ),
                            label_text(),
                        ),
                    ])
                    .patch_style(row_style(idx))
                })
                .collect(),
        },
        ModalSection::Comments => match modal.comments.empty_message() {
            Some(message) => vec![Line::styled(message, label_text())],
            None => modal
                .comments
                .rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    Line::from(vec![
                        Span::styled(row.date.clone(), highlight_text()),
                        Span::raw("  "),
                        Span::styled(row.text.clone(), normal_text()),
                    ])
                    .patch_style(row_style(idx))
                })
                .collect(),
        },
    };
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

fn render_footer<O: TaskBoardOperations, D: ImageDecoder>(
    app: &App<O, D>,
    frame: &mut Frame,
    area: Rect,
) {
    let hints = match app.mode {
        AppMode::Board if app.controller.board().in_transit().is_some() => {
            "h/l: choose column | m: drop | ESC: cancel"
        }
        AppMode::Board => {
            "n: new | h/j/k/l: navigate | e: edit | s/t/d/r: move | m: pick up | x: delete | R: reload | q: quit"
        }
        AppMode::Modal => match app.modal_section {
            ModalSection::Description => "TAB: next section | e: edit description | ESC: close",
            ModalSection::Checklist => {
                "TAB: next section | a: add | SPACE: toggle | x: delete | ESC: close"
            }
            ModalSection::Images => "TAB: next section | a: upload | x: delete | ESC: close",
            ModalSection::Comments => "TAB: next section | a: add | x: delete | ESC: close",
        },
        _ => "ENTER: confirm | ESC: cancel",
    };

    let mut lines = vec![Line::styled(hints, label_text())];
    if let Some(message) = &app.status_message {
        lines.insert(0, Line::styled(message.clone(), bold_highlight()));
    }
    let panel = PanelConfig::new(" Taskboard ");
    render_panel(frame, area, &panel, Paragraph::new(lines));
}
