// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. command::CommandSpec)
    clippy::module_name_repetitions
)]

//! # aiditor
//!
//! A small markdown editor extension with two features:
//! - **Select current sentence**: extend the selection from the cursor to
//!   the sentence around it, across line breaks
//! - **List-marker decoration**: draw a glyph over `-`/`*` list markers in
//!   the rendered view
//!
//! ## Modules
//!
//! - [`sentence`]: Sentence boundary scan
//! - [`editor`]: Positions, selections and the host text buffer
//! - [`command`]: User-invokable commands
//! - [`decoration`]: List-marker decorations over a syntax tree
//! - [`view`]: Scrollable markdown view feeding the decorations
//! - [`config`]: Flag defaults from rc files

pub mod command;
pub mod config;
pub mod decoration;
pub mod editor;
pub mod sentence;
pub mod view;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::command::select_current_sentence;
    pub use crate::decoration::{DecorationSet, ListMarkerPlugin};
    pub use crate::editor::{Editor, EditorBuffer, LineSource, Position, Selection};
    pub use crate::sentence::select_sentence_at;
    pub use crate::view::MarkdownView;
}
