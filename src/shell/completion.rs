// Tab completion and hints for console commands.
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

use super::commands::{CONNECT_FLAGS, NAMES};

pub struct ConsoleCompletion {
    commands: Vec<String>,
}

impl ConsoleCompletion {
    pub fn new() -> Self {
        let mut commands: Vec<String> = NAMES.iter().map(|s| s.to_string()).collect();
        commands.sort();
        Self { commands }
    }
}

impl Default for ConsoleCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for ConsoleCompletion {}

impl Completer for ConsoleCompletion {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Find the start of the current word
        let start = line
            .rfind(|c: char| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = &line[start..];

        if prefix.is_empty() {
            return Ok((start, vec![]));
        }

        // Flag completion applies only after the connect command
        if prefix.starts_with('-') {
            let head = line.split_whitespace().next().unwrap_or("");
            if head == "connect" {
                let matches: Vec<Pair> = CONNECT_FLAGS
                    .iter()
                    .filter(|flag| flag.starts_with(prefix))
                    .map(|flag| Pair {
                        display: flag.to_string(),
                        replacement: flag.to_string(),
                    })
                    .collect();
                return Ok((start, matches));
            }
            return Ok((start, vec![]));
        }

        // Command name completion only for the first word
        if start > 0 {
            return Ok((start, vec![]));
        }

        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();

        Ok((start, matches))
    }
}

impl Hinter for ConsoleCompletion {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() || line.contains(' ') {
            return None;
        }

        if line.len() < 2 {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ConsoleCompletion {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        false
    }
}

impl Validator for ConsoleCompletion {}
