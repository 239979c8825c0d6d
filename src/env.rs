//! Process-environment access behind an explicit seam.
//!
//! The console touches process-global state in exactly two places:
//! the `SERVER_SOFTWARE` marker written after a successful configure
//! call, and the `HOME`-derived history file path. Both go through
//! the [`Environment`] trait so tests can observe them without
//! mutating the real process environment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

pub trait Environment {
    /// Read a variable, `None` when unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Set a variable for the remainder of the process lifetime.
    fn set_var(&self, key: &str, value: &str);

    /// The current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set_var(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }

    fn home_dir(&self) -> Option<PathBuf> {
        // HOME wins where present so shells can redirect the history
        // file; dirs covers platforms that don't set it.
        self.var("HOME").map(PathBuf::from).or_else(dirs::home_dir)
    }
}

/// In-memory environment for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: Mutex<HashMap<String, String>>,
    home: Option<PathBuf>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment whose home directory is `home`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            vars: Mutex::new(HashMap::new()),
            home: Some(home.into()),
        }
    }
}

impl Environment for MemoryEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.lock().expect("env lock poisoned").get(key).cloned()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .expect("env lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_env_roundtrip() {
        let env = MemoryEnv::new();
        assert_eq!(env.var("SERVER_SOFTWARE"), None);

        env.set_var("SERVER_SOFTWARE", "Development (remote_api)/1");
        assert_eq!(
            env.var("SERVER_SOFTWARE").as_deref(),
            Some("Development (remote_api)/1")
        );
    }

    #[test]
    fn memory_env_home() {
        assert_eq!(MemoryEnv::new().home_dir(), None);

        let env = MemoryEnv::with_home("/home/dev");
        assert_eq!(env.home_dir(), Some(PathBuf::from("/home/dev")));
    }
}
