//! Command parsing for the console loop.

use crate::error::{ConsoleError, Result};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Configure a connection to an application backend
    Connect {
        app_id: String,
        host: Option<String>,
        path: Option<String>,
        email: Option<String>,
        local_dev: bool,
    },
    /// Show whether a connection is configured
    Status,
    /// Re-verify the configured endpoint
    Ping,
    /// Show the resolved connection parameters
    Info,
    /// Show recent history entries
    History,
    /// Show help
    Help { topic: Option<String> },
    /// Clear the screen
    Clear,
    /// Leave the console
    Quit,
    /// Anything unrecognized
    Unknown { input: String },
}

/// Command names, for completion and help.
pub const NAMES: &[&str] = &[
    "connect", "status", "ping", "info", "history", "help", "clear", "quit", "exit",
];

/// Flags accepted by `connect`, for completion.
pub const CONNECT_FLAGS: &[&str] = &["--host", "--path", "--email", "--local-dev"];

pub fn parse(input: &str) -> Result<Command> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((head, args)) = parts.split_first() else {
        return Ok(Command::Unknown {
            input: String::new(),
        });
    };

    match head.to_lowercase().as_str() {
        "connect" => parse_connect(args),
        "status" => Ok(Command::Status),
        "ping" => Ok(Command::Ping),
        "info" => Ok(Command::Info),
        "history" | "hist" => Ok(Command::History),
        "help" | "?" => Ok(Command::Help {
            topic: args.first().map(|s| s.to_string()),
        }),
        "clear" | "cls" => Ok(Command::Clear),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Ok(Command::Unknown {
            input: input.to_string(),
        }),
    }
}

fn parse_connect(args: &[&str]) -> Result<Command> {
    let mut app_id = None;
    let mut host = None;
    let mut path = None;
    let mut email = None;
    let mut local_dev = false;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--host" if i + 1 < args.len() => {
                host = Some(args[i + 1].to_string());
                i += 2;
            }
            "--path" if i + 1 < args.len() => {
                path = Some(args[i + 1].to_string());
                i += 2;
            }
            "--email" if i + 1 < args.len() => {
                email = Some(args[i + 1].to_string());
                i += 2;
            }
            "--local-dev" => {
                local_dev = true;
                i += 1;
            }
            flag if flag.starts_with("--") => {
                return Err(ConsoleError::Config(format!(
                    "unknown connect flag: {flag} (usage: connect <app_id> [--host H] [--path P] [--email E] [--local-dev])"
                )));
            }
            positional => {
                if app_id.replace(positional.to_string()).is_some() {
                    return Err(ConsoleError::Config(format!(
                        "unexpected argument: {positional}"
                    )));
                }
                i += 1;
            }
        }
    }

    let app_id = app_id.ok_or(ConsoleError::MissingAppId)?;
    Ok(Command::Connect {
        app_id,
        host,
        path,
        email,
        local_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_connect() {
        let cmd = parse("connect myapp").unwrap();
        assert_eq!(
            cmd,
            Command::Connect {
                app_id: "myapp".to_string(),
                host: None,
                path: None,
                email: None,
                local_dev: false,
            }
        );
    }

    #[test]
    fn parses_connect_flags() {
        let cmd = parse("connect myapp --host example.com --email dev@example.com").unwrap();
        match cmd {
            Command::Connect {
                app_id,
                host,
                email,
                ..
            } => {
                assert_eq!(app_id, "myapp");
                assert_eq!(host.as_deref(), Some("example.com"));
                assert_eq!(email.as_deref(), Some("dev@example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn connect_without_app_id_is_an_error() {
        assert!(matches!(
            parse("connect --local-dev").unwrap_err(),
            ConsoleError::MissingAppId
        ));
    }

    #[test]
    fn connect_rejects_unknown_flag() {
        assert!(matches!(
            parse("connect myapp --port 80").unwrap_err(),
            ConsoleError::Config(_)
        ));
    }

    #[test]
    fn aliases() {
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(parse("q").unwrap(), Command::Quit);
        assert_eq!(parse("hist").unwrap(), Command::History);
        assert_eq!(
            parse("? connect").unwrap(),
            Command::Help {
                topic: Some("connect".to_string())
            }
        );
    }

    #[test]
    fn unknown_passthrough() {
        assert_eq!(
            parse("frobnicate").unwrap(),
            Command::Unknown {
                input: "frobnicate".to_string()
            }
        );
    }
}
