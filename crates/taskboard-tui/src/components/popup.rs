use crate::input::InputState;
use crate::theme::{error_text, focused_border, highlight_text, normal_text, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Clear a centered area, draw a bordered block and return its inner area.
pub fn render_popup_with_block(
    frame: &mut Frame,
    title: &str,
    width_percent: u16,
    height_percent: u16,
) -> Rect {
    let area = centered_rect(width_percent, height_percent, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn render_input_popup(frame: &mut Frame, title: &str, label: &str, input: &InputState) {
    let inner = render_popup_with_block(frame, title, 60, 30);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(label.to_string()).style(highlight_text()), chunks[0]);

    let field = Paragraph::new(input.as_str().to_string())
        .style(normal_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(field, chunks[1]);

    let cursor_x = chunks[1].x + input.cursor_column() as u16 + 1;
    frame.set_cursor_position((cursor_x, chunks[1].y + 1));
}

/// Blocking message; any key dismisses it.
pub fn render_alert_popup(frame: &mut Frame, message: &str) {
    let inner = render_popup_with_block(frame, " Alert ", 40, 20);
    let body = Paragraph::new(vec![
        Line::styled(message.to_string(), error_text()),
        Line::from(""),
        Line::styled("Press any key", highlight_text()),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}
