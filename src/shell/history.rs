//! History persistence for the console session.

use crate::env::Environment;
use crate::error::{ConsoleError, Result};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-user history file, directly under the home directory.
pub const HISTORY_FILE_NAME: &str = ".remoteapi_history";

/// Handle to the on-disk history file for one session.
///
/// Attaching loads prior entries into the editor, treating a missing
/// file as an empty history; any other load fault propagates. The
/// session writes the in-memory history back through [`History::save`]
/// on its way out.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
}

impl History {
    /// Resolve the per-user history path and load prior entries.
    pub fn attach<H, I>(editor: &mut Editor<H, I>, env: &dyn Environment) -> Result<Self>
    where
        H: rustyline::Helper,
        I: rustyline::history::History,
    {
        let path = Self::resolve_path(env)?;

        match editor.load_history(&path) {
            Ok(()) => debug!(path = %path.display(), "loaded history"),
            Err(ReadlineError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self { path })
    }

    /// Where the history file lives for `env`.
    pub fn resolve_path(env: &dyn Environment) -> Result<PathBuf> {
        env.home_dir()
            .map(|home| home.join(HISTORY_FILE_NAME))
            .ok_or_else(|| {
                ConsoleError::Config("cannot locate a home directory for the history file".into())
            })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the editor's in-memory history back to disk.
    pub fn save<H, I>(&self, editor: &mut Editor<H, I>) -> Result<()>
    where
        H: rustyline::Helper,
        I: rustyline::history::History,
    {
        editor.save_history(&self.path)?;
        debug!(path = %self.path.display(), "saved history");
        Ok(())
    }

    /// The most recent `limit` saved entries, oldest first.
    pub fn tail(&self, limit: usize) -> Result<Vec<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<String> = contents
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.to_string())
            .collect();

        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;
    use rustyline::history::History as _;
    use rustyline::DefaultEditor;

    #[test]
    fn attach_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = MemoryEnv::with_home(dir.path());
        let mut editor = DefaultEditor::new().unwrap();

        let history = History::attach(&mut editor, &env).unwrap();
        assert_eq!(editor.history().len(), 0);
        assert_eq!(history.path(), dir.path().join(HISTORY_FILE_NAME));
    }

    #[test]
    fn attach_loads_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let env = MemoryEnv::with_home(dir.path());
        std::fs::write(
            dir.path().join(HISTORY_FILE_NAME),
            "connect myapp\nstatus\n",
        )
        .unwrap();

        let mut editor = DefaultEditor::new().unwrap();
        History::attach(&mut editor, &env).unwrap();
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn save_roundtrips_entries() {
        let dir = tempfile::tempdir().unwrap();
        let env = MemoryEnv::with_home(dir.path());

        let mut editor = DefaultEditor::new().unwrap();
        let history = History::attach(&mut editor, &env).unwrap();
        editor.add_history_entry("connect myapp").unwrap();
        editor.add_history_entry("ping").unwrap();
        history.save(&mut editor).unwrap();

        let mut second = DefaultEditor::new().unwrap();
        History::attach(&mut second, &env).unwrap();
        assert_eq!(second.history().len(), 2);
    }

    #[test]
    fn no_home_is_an_error() {
        let env = MemoryEnv::new();
        let mut editor = DefaultEditor::new().unwrap();
        assert!(matches!(
            History::attach(&mut editor, &env).unwrap_err(),
            ConsoleError::Config(_)
        ));
    }

    #[test]
    fn tail_returns_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let env = MemoryEnv::with_home(dir.path());
        std::fs::write(dir.path().join(HISTORY_FILE_NAME), "one\ntwo\nthree\n").unwrap();

        let mut editor = DefaultEditor::new().unwrap();
        let history = History::attach(&mut editor, &env).unwrap();
        assert_eq!(history.tail(2).unwrap(), vec!["two", "three"]);
        assert_eq!(history.tail(10).unwrap().len(), 3);
    }
}
