//! End-to-end checks of the sentence command against a host buffer.

use aiditor::command::{SELECT_CURRENT_SENTENCE, run, select_current_sentence};
use aiditor::editor::{EditorBuffer, Position, Selection};
use aiditor::sentence::select_sentence_at;

fn select_in(text: &str, line: usize, col: usize) -> (Selection, Option<String>) {
    let mut buf = EditorBuffer::from_text(text);
    buf.move_to(line, col);
    let selection = select_current_sentence(&mut buf).unwrap();
    (selection, buf.selected_text())
}

#[test]
fn test_line_without_terminator_selects_up_to_cursor() {
    let (selection, text) = select_in("a line with no end", 0, 6);
    assert_eq!(selection.anchor, Position::new(0, 0));
    assert_eq!(selection.head, Position::new(0, 6));
    assert_eq!(text.as_deref(), Some("a line"));
}

#[test]
fn test_selection_respects_sentence_boundaries() {
    let (selection, text) = select_in("Hello world. Bye now.", 0, 15);
    assert_eq!(selection.anchor, Position::new(0, 13));
    assert_eq!(selection.head, Position::new(0, 21));
    assert_eq!(text.as_deref(), Some("Bye now."));
}

#[test]
fn test_start_lands_on_line_after_terminator() {
    // Regression: the start must be reported on the line that holds the
    // sentence text, not the line whose scan found the terminator.
    let (selection, text) = select_in("This is one.\nThis is two", 1, 11);
    assert_eq!(selection.anchor, Position::new(1, 0));
    assert_eq!(selection.head, Position::new(1, 11));
    assert_eq!(text.as_deref(), Some("This is two"));
}

#[test]
fn test_no_terminator_anywhere_reaches_document_start() {
    let (selection, text) = select_in("abc\ndef\nghi", 2, 3);
    assert_eq!(selection.anchor, Position::new(0, 0));
    assert_eq!(selection.head, Position::new(2, 3));
    assert_eq!(text.as_deref(), Some("abc\ndef\nghi"));
}

#[test]
fn test_wrapped_paragraph_sentence() {
    let text = "The first sentence ends here. The second one\nis wrapped across\nthree lines! Then more.";
    let (selection, selected) = select_in(text, 1, 4);
    assert_eq!(selection.anchor, Position::new(0, 30));
    assert_eq!(selection.head, Position::new(1, 4));
    assert_eq!(selected.as_deref(), Some("The second one\nis w"));

    let (_, selected) = select_in(text, 2, 8);
    assert_eq!(
        selected.as_deref(),
        Some("The second one\nis wrapped across\nthree lines!")
    );
}

#[test]
fn test_cursor_at_document_start_is_empty() {
    let (selection, text) = select_in("Start here. Then go.", 0, 0);
    assert!(selection.is_empty());
    assert_eq!(text.as_deref(), Some(""));
}

#[test]
fn test_crlf_document() {
    let (selection, text) = select_in("First.\r\nSecond part", 1, 6);
    assert_eq!(selection.anchor, Position::new(1, 0));
    assert_eq!(text.as_deref(), Some("Second"));
}

#[test]
fn test_run_by_id_matches_direct_call() {
    let mut direct = EditorBuffer::from_text("Alpha. Beta gamma.");
    direct.move_to(0, 9);
    let mut by_id = EditorBuffer::from_text("Alpha. Beta gamma.");
    by_id.move_to(0, 9);

    let a = select_current_sentence(&mut direct).unwrap();
    let b = run(SELECT_CURRENT_SENTENCE, &mut by_id).unwrap();
    assert_eq!(a, b);
    assert_eq!(by_id.selected_text().as_deref(), Some("Beta gamma."));
}

#[test]
fn test_selection_does_not_change_buffer_text() {
    let text = "One. Two three.\nFour five";
    let mut buf = EditorBuffer::from_text(text);
    buf.move_to(1, 4);
    select_current_sentence(&mut buf).unwrap();
    assert_eq!(buf.text(), text);
}

#[test]
fn test_plain_line_slices_work_without_an_editor() {
    let lines = vec!["No end in sight", "still going."];
    let selection = select_sentence_at(&lines, Position::new(1, 5)).unwrap();
    assert_eq!(selection.anchor, Position::ORIGIN);
    assert_eq!(selection.head, Position::new(1, 12));
}

#[test]
fn test_lone_cr_document() {
    let (selection, text) = select_in("One.\rTwo", 1, 3);
    assert_eq!(selection.anchor, Position::new(1, 0));
    assert_eq!(selection.head, Position::new(1, 3));
    assert_eq!(text.as_deref(), Some("Two"));
}

#[test]
fn test_cursor_in_gap_after_terminator() {
    let (selection, text) = select_in("Hello.  Bye", 0, 6);
    assert_eq!(selection, Selection::new(Position::ORIGIN, Position::new(0, 6)));
    assert_eq!(text.as_deref(), Some("Hello."));

    // Past the first blank the next sentence has begun but holds no text
    // before the cursor yet.
    let (selection, _) = select_in("Hello.  Bye", 0, 7);
    assert_eq!(selection, Selection::caret(Position::new(0, 7)));
}
