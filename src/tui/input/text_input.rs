//! Text input field handling.

use unicode_width::UnicodeWidthStr;

/// State for a single-line text input field.
///
/// The cursor counts characters, not bytes, so symbols and dates typed with
/// non-ASCII characters edit correctly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    /// The current text content.
    pub content: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input holding `content` with the cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `index` (or the end).
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.content.len())
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the beginning.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clears the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Terminal column of the cursor relative to the start of the text.
    pub fn cursor_column(&self) -> u16 {
        let width = self.content[..self.byte_offset(self.cursor)].width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
