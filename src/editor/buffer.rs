use std::borrow::Cow;

use ropey::{Rope, RopeSlice};

use super::types::{Editor, LineSource, Position, Selection};

/// A text buffer backed by a rope data structure.
///
/// Plays the host editor for the sentence command: it hands out lines,
/// tracks the cursor and holds the visible selection. Columns are
/// character offsets within a line.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Position,
    selection: Option<Selection>,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::ORIGIN,
            selection: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// The active selection, if any.
    pub const fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        self.line_slice(line_idx).map(|s| s.to_string())
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_slice(line_idx).map_or(0, |s| s.len_chars())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Move cursor to a specific line and column, clamped to the buffer.
    ///
    /// Moving the cursor drops any selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor = self.clamp(Position::new(line, col));
        self.selection = None;
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.move_to(last_line, self.line_len(last_line));
    }

    /// Apply a selection. The cursor follows the selection head.
    pub fn set_selection(&mut self, selection: Selection) {
        let selection = Selection::new(self.clamp(selection.anchor), self.clamp(selection.head));
        self.cursor = selection.head;
        self.selection = Some(selection);
    }

    /// Drop the selection, leaving the cursor where it is.
    pub const fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Text covered by the active selection, in document order.
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.selection?;
        let from = self.char_idx(selection.start());
        let to = self.char_idx(selection.end());
        Some(self.rope.slice(from..to).to_string())
    }

    // --- Private helpers ---

    /// A line with its line ending stripped.
    fn line_slice(&self, line_idx: usize) -> Option<RopeSlice<'_>> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        } else if len > 0 && is_line_break(line.char(len - 1)) {
            len -= 1;
        }
        Some(line.slice(..len))
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    /// Convert a position to a ropey char index.
    fn char_idx(&self, pos: Position) -> usize {
        self.rope.line_to_char(pos.line) + pos.col
    }
}

/// Line breaks other than `\n` that ropey splits lines on.
const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl LineSource for EditorBuffer {
    fn line_count(&self) -> usize {
        Self::line_count(self)
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.line_slice(index).map(Cow::from)
    }
}

impl Editor for EditorBuffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_selection(&mut self, selection: Selection) {
        Self::set_selection(self, selection);
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .finish()
    }
}
