//! Sentence boundary detection around the cursor.
//!
//! [`select_sentence_at`] finds the sentence containing (or just finished
//! before) the cursor:
//! - The end is fixed on the cursor line: the cursor itself when it sits
//!   right after a terminator, otherwise just past the next terminator on
//!   the line, otherwise the cursor column.
//! - The start is found by scanning backward for the previous terminator,
//!   crossing onto earlier lines as needed, then skipping the spaces and
//!   tabs that follow it.
//!
//! Terminators are `.`, `!` and `?`. Abbreviations, quotes and grapheme
//! clusters get no special treatment.

mod scan;

use thiserror::Error;
use tracing::debug;

use crate::editor::{LineSource, Position, Selection};

pub use scan::{
    TERMINATORS, is_blank, is_terminator, scan_back_to_terminator, scan_forward_to_terminator,
    skip_leading_whitespace,
};

/// A cursor or buffer that the selector cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceError {
    #[error("buffer has no lines")]
    EmptyBuffer,
    #[error("line {line} is out of range (buffer has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("column {col} is out of range for line {line} (length {len})")]
    ColumnOutOfRange { line: usize, col: usize, len: usize },
}

/// Compute the selection covering the sentence at `cursor`.
///
/// The anchor is the sentence start and the head is the sentence end. The
/// anchor may lie on an earlier line than the head; the head is always on
/// the cursor line. The buffer is only read.
///
/// A cursor directly after a terminator selects the sentence it closes. Once
/// the cursor moves into the blanks that follow, the next sentence has
/// started: its start lies past the blanks, so with no terminator ahead on
/// the line the start is clamped to the cursor and the selection is empty.
/// In `"Hello.  Bye"`, column 6 selects `"Hello."` and column 7 selects
/// nothing.
///
/// # Errors
///
/// Returns [`SentenceError`] when the buffer is empty or the cursor lies
/// outside it. Out-of-range cursors are never clamped.
///
/// # Example
///
/// ```
/// use aiditor::editor::Position;
/// use aiditor::sentence::select_sentence_at;
///
/// let lines = ["Hello world. Bye now."];
/// let sel = select_sentence_at(&lines[..], Position::new(0, 15)).unwrap();
/// assert_eq!(sel.anchor, Position::new(0, 13));
/// assert_eq!(sel.head, Position::new(0, 21));
/// ```
pub fn select_sentence_at<B>(buffer: &B, cursor: Position) -> Result<Selection, SentenceError>
where
    B: LineSource + ?Sized,
{
    validate_cursor(buffer, cursor)?;

    let mut scanner = scan::Scanner::new(buffer, cursor);
    let start = scanner.run()?;
    let selection = Selection::new(start, scanner.end());
    debug!(
        ?cursor,
        anchor = ?selection.anchor,
        head = ?selection.head,
        "selected sentence"
    );
    Ok(selection)
}

fn validate_cursor<B>(buffer: &B, cursor: Position) -> Result<(), SentenceError>
where
    B: LineSource + ?Sized,
{
    let line_count = buffer.line_count();
    if line_count == 0 {
        return Err(SentenceError::EmptyBuffer);
    }
    let out_of_range = SentenceError::LineOutOfRange {
        line: cursor.line,
        line_count,
    };
    if cursor.line >= line_count {
        return Err(out_of_range);
    }
    let len = buffer
        .line(cursor.line)
        .ok_or(out_of_range)?
        .chars()
        .count();
    if cursor.col > len {
        return Err(SentenceError::ColumnOutOfRange {
            line: cursor.line,
            col: cursor.col,
            len,
        });
    }
    Ok(())
}
