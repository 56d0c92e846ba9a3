//! Single-line text field state.

/// Text plus a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// Creates a new empty field.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position (character index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor. Returns true if text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Deletes the character at the cursor. Returns true if text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = TextField::new();
        for c in "abc".chars() {
            field.insert(c);
        }
        assert_eq!(field.text(), "abc");
        assert!(field.backspace());
        assert_eq!(field.text(), "ab");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut field = TextField::new();
        field.set("ab");
        field.move_home();
        assert!(!field.backspace());
        assert_eq!(field.text(), "ab");
    }

    #[test]
    fn test_insert_mid_text() {
        let mut field = TextField::new();
        field.set("ac");
        field.move_left();
        field.insert('b');
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = TextField::new();
        field.set("Zoë");
        assert_eq!(field.cursor(), 3);
        field.move_left();
        assert!(field.delete());
        assert_eq!(field.text(), "Zo");
        field.insert('é');
        assert_eq!(field.text(), "Zoé");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut field = TextField::new();
        field.set("x");
        assert!(!field.delete());
        field.move_right();
        assert_eq!(field.cursor(), 1);
    }
}
