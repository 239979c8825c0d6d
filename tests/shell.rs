//! Integration tests for the console shell pieces.

use gae_console::env::MemoryEnv;
use gae_console::shell::{self, parse, Command, History};
use rustyline::history::History as _;

#[test]
fn editor_with_history_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let env = MemoryEnv::with_home(dir.path());

    // First session: nothing on disk yet.
    let mut editor = shell::editor().unwrap();
    let history = History::attach(&mut editor, &env).unwrap();
    assert_eq!(editor.history().len(), 0);

    editor.add_history_entry("connect myapp --local-dev").unwrap();
    editor.add_history_entry("status").unwrap();
    history.save(&mut editor).unwrap();

    // Second session sees the prior entries before reading any input.
    let mut editor = shell::editor().unwrap();
    History::attach(&mut editor, &env).unwrap();
    assert_eq!(editor.history().len(), 2);
}

#[test]
fn history_survives_unrelated_commands() {
    let dir = tempfile::tempdir().unwrap();
    let env = MemoryEnv::with_home(dir.path());

    let mut editor = shell::editor().unwrap();
    let history = History::attach(&mut editor, &env).unwrap();
    editor.add_history_entry("ping").unwrap();
    history.save(&mut editor).unwrap();

    assert_eq!(history.tail(10).unwrap(), vec!["ping"]);
}

#[test]
fn parsed_commands_match_the_console_surface() {
    assert_eq!(parse("status").unwrap(), Command::Status);
    assert_eq!(parse("PING").unwrap(), Command::Ping);
    assert_eq!(parse("quit").unwrap(), Command::Quit);

    match parse("connect myapp --path /custom/remote").unwrap() {
        Command::Connect { app_id, path, .. } => {
            assert_eq!(app_id, "myapp");
            assert_eq!(path.as_deref(), Some("/custom/remote"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
