/// Single-line text buffer with a cursor, edited a character at a time.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    /// Hand back the contents and leave the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Cursor column in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_editing() {
        let mut input = InputState::new();
        for c in "Buy mlk".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.move_left();
        input.insert_char('i');
        assert_eq!(input.as_str(), "Buy milk");

        input.move_home();
        input.delete();
        input.insert_char('b');
        assert_eq!(input.as_str(), "buy milk");
        assert_eq!(input.cursor_column(), 1);
    }

    #[test]
    fn test_edges_are_noops() {
        let mut input = InputState::new();
        input.backspace();
        input.delete();
        input.move_left();
        input.move_right();
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = InputState::new();
        input.set("a\u{00e9}\u{1f600}");
        assert_eq!(input.cursor_column(), 3);

        input.backspace();
        assert_eq!(input.as_str(), "a\u{00e9}");
        input.move_left();
        assert_eq!(input.cursor_column(), 1);
        input.delete();
        assert_eq!(input.as_str(), "a");
    }

    #[test]
    fn test_take_clears_input() {
        let mut input = InputState::new();
        input.set("note");
        assert_eq!(input.take(), "note");
        assert!(input.as_str().is_empty());
        assert_eq!(input.cursor_column(), 0);
    }
}
