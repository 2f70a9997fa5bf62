//! Boundary helpers and the backward scan state machine.

use tracing::trace;

use super::SentenceError;
use crate::editor::{LineSource, Position};

/// Characters that end a sentence.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Returns true if `c` ends a sentence.
pub const fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Whitespace skipped between a terminator and the next sentence.
///
/// Only space and tab; newlines never appear inside a line.
pub const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Move backward from `from` until the character before the pointer is a
/// terminator or the pointer reaches column 0.
///
/// The result is either 0 or the column just past a terminator.
pub fn scan_back_to_terminator(line: &[char], from: usize) -> usize {
    let mut col = from.min(line.len());
    while col > 0 && !is_terminator(line[col - 1]) {
        col -= 1;
    }
    col
}

/// Move forward from `from` past any spaces and tabs.
pub fn skip_leading_whitespace(line: &[char], from: usize) -> usize {
    let mut col = from.min(line.len());
    while col < line.len() && is_blank(line[col]) {
        col += 1;
    }
    col
}

/// Column just past the first terminator at or after `from`, if any.
pub fn scan_forward_to_terminator(line: &[char], from: usize) -> Option<usize> {
    line.get(from..)?
        .iter()
        .position(|&c| is_terminator(c))
        .map(|i| from + i + 1)
}

/// States of the sentence scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Fix the sentence end on the cursor line.
    ScanningBackwardForEnd,
    /// Walk backward on `line` from column `from` looking for a terminator.
    ScanningBackwardForStart { line: usize, from: usize },
    /// The start scan hit column 0 of `line` without a terminator.
    AdvanceToPreviousLine { line: usize },
    /// Skip whitespace following the terminator found on `line`.
    TrimmingWhitespace { line: usize, from: usize },
    /// The sentence starts at `start`.
    Done { start: Position },
}

/// Drives [`ScanState`] transitions over a line source.
pub(crate) struct Scanner<'a, B: LineSource + ?Sized> {
    buffer: &'a B,
    cursor: Position,
    end: Position,
}

impl<'a, B: LineSource + ?Sized> Scanner<'a, B> {
    /// `cursor` must already be validated against `buffer`.
    pub(crate) const fn new(buffer: &'a B, cursor: Position) -> Self {
        Self {
            buffer,
            cursor,
            end: cursor,
        }
    }

    /// Sentence end, known once the end state has run.
    pub(crate) const fn end(&self) -> Position {
        self.end
    }

    /// Run from the initial state to `Done`, returning the sentence start.
    pub(crate) fn run(&mut self) -> Result<Position, SentenceError> {
        let mut state = ScanState::ScanningBackwardForEnd;
        loop {
            trace!(?state, "sentence scan");
            match self.step(state)? {
                ScanState::Done { start } => return Ok(start.min(self.end)),
                next => state = next,
            }
        }
    }

    pub(crate) fn step(&mut self, state: ScanState) -> Result<ScanState, SentenceError> {
        match state {
            ScanState::ScanningBackwardForEnd => {
                if self.cursor == Position::ORIGIN {
                    return Ok(ScanState::Done {
                        start: Position::ORIGIN,
                    });
                }
                let Position { line, col } = self.cursor;
                let chars = self.chars(line)?;
                let closed = col > 0 && is_terminator(chars[col - 1]);
                let end_col = if closed {
                    col
                } else {
                    scan_forward_to_terminator(&chars, col).unwrap_or(col)
                };
                self.end = Position::new(line, end_col);
                // Step over the terminator that closes this sentence.
                let from = if end_col > 0 && is_terminator(chars[end_col - 1]) {
                    end_col - 1
                } else {
                    end_col
                };
                Ok(ScanState::ScanningBackwardForStart { line, from })
            }
            ScanState::ScanningBackwardForStart { line, from } => {
                let col = scan_back_to_terminator(&self.chars(line)?, from);
                Ok(if col > 0 {
                    ScanState::TrimmingWhitespace { line, from: col }
                } else if line == 0 {
                    ScanState::Done {
                        start: Position::ORIGIN,
                    }
                } else {
                    ScanState::AdvanceToPreviousLine { line }
                })
            }
            ScanState::AdvanceToPreviousLine { line } => {
                let prev = line.saturating_sub(1);
                let from = self.chars(prev)?.len();
                Ok(ScanState::ScanningBackwardForStart { line: prev, from })
            }
            ScanState::TrimmingWhitespace { line, from } => {
                let chars = self.chars(line)?;
                let col = skip_leading_whitespace(&chars, from);
                Ok(if col == chars.len() && line < self.cursor.line {
                    ScanState::TrimmingWhitespace {
                        line: line + 1,
                        from: 0,
                    }
                } else {
                    ScanState::Done {
                        start: Position::new(line, col),
                    }
                })
            }
            ScanState::Done { .. } => Ok(state),
        }
    }

    fn chars(&self, line: usize) -> Result<Vec<char>, SentenceError> {
        self.buffer
            .line(line)
            .map(|text| text.chars().collect())
            .ok_or_else(|| SentenceError::LineOutOfRange {
                line,
                line_count: self.buffer.line_count(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // --- Character classes ---

    #[test]
    fn test_terminators() {
        for c in TERMINATORS {
            assert!(is_terminator(c));
        }
        assert!(!is_terminator(','));
        assert!(!is_terminator(';'));
    }

    #[test]
    fn test_blank_is_space_and_tab_only() {
        assert!(is_blank(' '));
        assert!(is_blank('\t'));
        assert!(!is_blank('\n'));
        assert!(!is_blank('\u{a0}'));
    }

    // --- scan_back_to_terminator ---

    #[test]
    fn test_scan_back_stops_after_terminator() {
        let line = chars("Hello world. Bye now");
        assert_eq!(scan_back_to_terminator(&line, 15), 12);
    }

    #[test]
    fn test_scan_back_reaches_line_start() {
        let line = chars("no terminator here");
        assert_eq!(scan_back_to_terminator(&line, 10), 0);
    }

    #[test]
    fn test_scan_back_does_not_move_past_adjacent_terminator() {
        let line = chars("Why?!");
        assert_eq!(scan_back_to_terminator(&line, 4), 4);
        assert_eq!(scan_back_to_terminator(&line, 3), 0);
    }

    #[test]
    fn test_scan_back_clamps_from_to_line_length() {
        let line = chars("a.b");
        assert_eq!(scan_back_to_terminator(&line, 99), 2);
    }

    // --- skip_leading_whitespace ---

    #[test]
    fn test_skip_whitespace_spaces_and_tabs() {
        let line = chars("One. \t Two");
        assert_eq!(skip_leading_whitespace(&line, 4), 7);
    }

    #[test]
    fn test_skip_whitespace_stops_at_line_end() {
        let line = chars("End.   ");
        assert_eq!(skip_leading_whitespace(&line, 4), 7);
    }

    #[test]
    fn test_skip_whitespace_no_whitespace_is_noop() {
        let line = chars("a.b");
        assert_eq!(skip_leading_whitespace(&line, 2), 2);
    }

    // --- scan_forward_to_terminator ---

    #[test]
    fn test_scan_forward_finds_next_terminator() {
        let line = chars("Hello world. Bye now.");
        assert_eq!(scan_forward_to_terminator(&line, 15), Some(21));
        assert_eq!(scan_forward_to_terminator(&line, 0), Some(12));
    }

    #[test]
    fn test_scan_forward_without_terminator() {
        let line = chars("trailing words");
        assert_eq!(scan_forward_to_terminator(&line, 3), None);
        assert_eq!(scan_forward_to_terminator(&line, 99), None);
    }

    // --- State transitions ---

    #[test]
    fn test_origin_cursor_is_done_immediately() {
        let lines = ["Hello. World."];
        let mut scanner = Scanner::new(&lines[..], Position::ORIGIN);
        let next = scanner.step(ScanState::ScanningBackwardForEnd).unwrap();
        assert_eq!(
            next,
            ScanState::Done {
                start: Position::ORIGIN
            }
        );
    }

    #[test]
    fn test_end_state_steps_over_closing_terminator() {
        let lines = ["One. Two."];
        let mut scanner = Scanner::new(&lines[..], Position::new(0, 9));
        let next = scanner.step(ScanState::ScanningBackwardForEnd).unwrap();
        assert_eq!(next, ScanState::ScanningBackwardForStart { line: 0, from: 8 });
        assert_eq!(scanner.end(), Position::new(0, 9));
    }

    #[test]
    fn test_end_state_extends_to_next_terminator() {
        let lines = ["One. Two words."];
        let mut scanner = Scanner::new(&lines[..], Position::new(0, 7));
        scanner.step(ScanState::ScanningBackwardForEnd).unwrap();
        assert_eq!(scanner.end(), Position::new(0, 15));
    }

    #[test]
    fn test_start_state_without_terminator_advances_line() {
        let lines = ["first", "second"];
        let mut scanner = Scanner::new(&lines[..], Position::new(1, 3));
        let next = scanner
            .step(ScanState::ScanningBackwardForStart { line: 1, from: 3 })
            .unwrap();
        assert_eq!(next, ScanState::AdvanceToPreviousLine { line: 1 });
    }

    #[test]
    fn test_start_state_on_first_line_finishes_at_origin() {
        let lines = ["first", "second"];
        let mut scanner = Scanner::new(&lines[..], Position::new(1, 3));
        let next = scanner
            .step(ScanState::ScanningBackwardForStart { line: 0, from: 5 })
            .unwrap();
        assert_eq!(
            next,
            ScanState::Done {
                start: Position::ORIGIN
            }
        );
    }

    #[test]
    fn test_advance_restarts_from_end_of_previous_line() {
        let lines = ["first line", "second"];
        let mut scanner = Scanner::new(&lines[..], Position::new(1, 3));
        let next = scanner
            .step(ScanState::AdvanceToPreviousLine { line: 1 })
            .unwrap();
        assert_eq!(next, ScanState::ScanningBackwardForStart { line: 0, from: 10 });
    }

    #[test]
    fn test_trimming_continues_onto_next_line() {
        let lines = ["Done.  ", "  Next"];
        let mut scanner = Scanner::new(&lines[..], Position::new(1, 6));
        let next = scanner
            .step(ScanState::TrimmingWhitespace { line: 0, from: 5 })
            .unwrap();
        assert_eq!(next, ScanState::TrimmingWhitespace { line: 1, from: 0 });
        let next = scanner.step(next).unwrap();
        assert_eq!(
            next,
            ScanState::Done {
                start: Position::new(1, 2)
            }
        );
    }

    #[test]
    fn test_trimming_stops_on_cursor_line() {
        let lines = ["Done.   "];
        let mut scanner = Scanner::new(&lines[..], Position::new(0, 8));
        let next = scanner
            .step(ScanState::TrimmingWhitespace { line: 0, from: 5 })
            .unwrap();
        assert_eq!(
            next,
            ScanState::Done {
                start: Position::new(0, 8)
            }
        );
    }

    #[test]
    fn test_run_clamps_start_to_end() {
        // Cursor sits in the gap before a sentence with no terminator yet.
        let lines = ["Hello.  Bye"];
        let mut scanner = Scanner::new(&lines[..], Position::new(0, 7));
        let start = scanner.run().unwrap();
        assert_eq!(start, Position::new(0, 7));
        assert_eq!(scanner.end(), Position::new(0, 7));
    }

    #[test]
    fn test_missing_line_is_reported() {
        struct Truncated;
        impl LineSource for Truncated {
            fn line_count(&self) -> usize {
                2
            }
            fn line(&self, index: usize) -> Option<std::borrow::Cow<'_, str>> {
                (index == 1).then(|| "tail".into())
            }
        }
        let mut scanner = Scanner::new(&Truncated, Position::new(1, 2));
        assert_eq!(
            scanner.run(),
            Err(SentenceError::LineOutOfRange {
                line: 0,
                line_count: 2
            })
        );
    }
}
