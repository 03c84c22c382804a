use crate::input::InputState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Cancel,
    Confirm,
}

/// Feed one key into a text prompt.
///
/// Enter always confirms; blank input is for the caller to judge, since task
/// titles alert on it while checklist items and comments ignore it silently.
pub fn handle_dialog_input(input: &mut InputState, key: KeyEvent) -> DialogAction {
    match key.code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => DialogAction::Confirm,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.clear();
            DialogAction::None
        }
        KeyCode::Char(c) => {
            input.insert_char(c);
            DialogAction::None
        }
        KeyCode::Backspace => {
            input.backspace();
            DialogAction::None
        }
        KeyCode::Delete => {
            input.delete();
            DialogAction::None
        }
        KeyCode::Left => {
            input.move_left();
            DialogAction::None
        }
        KeyCode::Right => {
            input.move_right();
            DialogAction::None
        }
        KeyCode::Home => {
            input.move_home();
            DialogAction::None
        }
        KeyCode::End => {
            input.move_end();
            DialogAction::None
        }
        _ => DialogAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_confirms_even_when_blank() {
        let mut input = InputState::new();
        assert_eq!(
            handle_dialog_input(&mut input, key(KeyCode::Enter)),
            DialogAction::Confirm
        );
    }

    #[test]
    fn test_typing_and_clearing() {
        let mut input = InputState::new();
        handle_dialog_input(&mut input, key(KeyCode::Char('h')));
        handle_dialog_input(&mut input, key(KeyCode::Char('i')));
        assert_eq!(input.as_str(), "hi");

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_dialog_input(&mut input, ctrl_u), DialogAction::None);
        assert!(input.as_str().is_empty());

        assert_eq!(
            handle_dialog_input(&mut input, key(KeyCode::Esc)),
            DialogAction::Cancel
        );
    }
}
