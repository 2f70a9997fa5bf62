//! Core editor types.

use std::borrow::Cow;

use serde::Serialize;

/// A (line, column) position in a text buffer.
///
/// Columns count characters, not bytes. `col == line length` is the end of
/// the line. Ordering is line-major, then column, which is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub col: usize,
}

impl Position {
    /// Start of the document.
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A directional span between two positions.
///
/// `anchor` is where the selection starts and `head` is where the cursor
/// ends up. Nothing requires `anchor <= head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub const fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// An empty selection at a single position.
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The earlier of the two ends in document order.
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The later of the two ends in document order.
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }
}

/// Read-only, line-addressed access to a text buffer.
pub trait LineSource {
    /// Number of lines in the buffer.
    fn line_count(&self) -> usize;

    /// Content of a line without its trailing newline, or `None` past the end.
    fn line(&self, index: usize) -> Option<Cow<'_, str>>;
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get(index).map(|s| Cow::Borrowed(s.as_ref()))
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }
}

/// The host editor as seen by commands.
pub trait Editor: LineSource {
    /// Current cursor position.
    fn cursor(&self) -> Position;

    /// Replace the visible selection.
    fn set_selection(&mut self, selection: Selection);
}
