use crate::theme::{focused_border, unfocused_border};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

/// Bordered region whose border and title reflect keyboard focus.
pub struct PanelConfig {
    pub title: String,
    pub is_focused: bool,
}

impl PanelConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn border_style(&self) -> Style {
        if self.is_focused {
            focused_border()
        } else {
            unfocused_border()
        }
    }

    pub fn title_text(&self) -> String {
        if self.is_focused {
            format!("▶ {}", self.title)
        } else {
            self.title.clone()
        }
    }

    pub fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style())
            .title(self.title_text())
    }
}

/// Draw `content` inside the panel's block.
pub fn render_panel<W: Widget>(frame: &mut Frame, area: Rect, config: &PanelConfig, content: W) {
    let block = config.block();
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(content, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_changes_title_and_border() {
        let panel = PanelConfig::new("Checklist");
        assert_eq!(panel.title_text(), "Checklist");
        assert_eq!(panel.border_style(), unfocused_border());

        let panel = panel.focused(true);
        assert_eq!(panel.title_text(), "▶ Checklist");
        assert_eq!(panel.border_style(), focused_border());
    }
}
