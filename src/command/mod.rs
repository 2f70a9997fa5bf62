//! User-invokable editor commands.
//!
//! Commands take no arguments: they read what they need from the
//! [`Editor`] and write their result back through it.

use thiserror::Error;
use tracing::debug;

use crate::editor::{Editor, Selection};
use crate::sentence::{SentenceError, select_sentence_at};

/// Registry entry for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Stable identifier used for lookup and key bindings.
    pub id: &'static str,
    /// Human-readable name shown in command palettes.
    pub name: &'static str,
}

/// Id of the sentence selection command.
pub const SELECT_CURRENT_SENTENCE: &str = "select-current-sentence";

/// Every command this extension registers.
pub const COMMANDS: &[CommandSpec] = &[CommandSpec {
    id: SELECT_CURRENT_SENTENCE,
    name: "Select current sentence",
}];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error(transparent)]
    Selection(#[from] SentenceError),
}

/// Look up a registered command by id.
pub fn find(id: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.id == id)
}

/// Select the sentence around the editor's cursor.
///
/// # Errors
///
/// Propagates [`SentenceError`] if the editor reports a cursor outside its
/// own buffer. The selection is left untouched in that case.
pub fn select_current_sentence<E>(editor: &mut E) -> Result<Selection, SentenceError>
where
    E: Editor + ?Sized,
{
    let cursor = editor.cursor();
    let selection = select_sentence_at(&*editor, cursor)?;
    editor.set_selection(selection);
    Ok(selection)
}

/// Run a command by id.
///
/// # Errors
///
/// Returns [`CommandError::Unknown`] for ids not in [`COMMANDS`], or the
/// command's own failure.
pub fn run<E>(id: &str, editor: &mut E) -> Result<Selection, CommandError>
where
    E: Editor + ?Sized,
{
    let spec = find(id).ok_or_else(|| CommandError::Unknown(id.to_string()))?;
    debug!(id = spec.id, "running command");
    match spec.id {
        SELECT_CURRENT_SENTENCE => Ok(select_current_sentence(editor)?),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
