//! Editor collaborator: positions, selections and the host text buffer.
//!
//! The sentence selector only reads lines through [`LineSource`]. The
//! command layer additionally needs the cursor and a way to apply the
//! result, which [`Editor`] provides. [`EditorBuffer`] is a rope-backed
//! implementation of both.

mod buffer;
mod types;

pub use buffer::EditorBuffer;
pub use types::{Editor, LineSource, Position, Selection};
