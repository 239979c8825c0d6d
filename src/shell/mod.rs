//! Interactive console: line editing, completion, history, REPL.

mod commands;
mod completion;
mod history;
mod repl;

pub use commands::{parse, Command};
pub use completion::ConsoleCompletion;
pub use history::History;
pub use repl::Repl;

use crate::error::Result;
use rustyline::config::EditMode;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};

/// Build the console line editor with tab completion bound.
pub fn editor() -> Result<Editor<ConsoleCompletion, DefaultHistory>> {
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)?;
    editor.set_helper(Some(ConsoleCompletion::new()));
    Ok(editor)
}
