//! State of the single-line entry field.

use unicode_width::UnicodeWidthChar;

/// Longest line the field accepts, in characters.
const MAX_INPUT_CHARS: usize = 4096;

/// Text being typed plus the cursor, kept as chars so editing never splits
/// a code point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageInputState {
    chars: Vec<char>,
    /// Char index, `0..=chars.len()`.
    cursor: usize,
}

impl MessageInputState {
    /// Current field contents.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Cursor as a char index.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Terminal columns taken by the text left of the cursor.
    pub fn cursor_display_offset(&self) -> usize {
        self.chars[..self.cursor]
            .iter()
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    /// Inserts `ch` at the cursor. Returns false once the field is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.chars.len() >= MAX_INPUT_CHARS {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Backspace.
    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    /// Delete key: removes the char under the cursor.
    pub fn delete_char_at(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    /// Moves one char left, stopping at the start.
    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves one char right, stopping at the end.
    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    /// Jumps to the start of the line.
    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Jumps past the last char.
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Empties the field and resets the cursor.
    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Takes the trimmed line out of the field. A blank line stays where it
    /// is and yields `None`.
    pub fn take_submission(&mut self) -> Option<String> {
        let text = self.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let submission = trimmed.to_owned();
        self.clear();
        Some(submission)
    }
}
