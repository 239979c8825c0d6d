//! The interactive console loop.

use crate::auth::TerminalPrompt;
use crate::config::ConnectOptions;
use crate::env::Environment;
use crate::error::Result;
use crate::remote::{self, RemoteApiStub};
use crate::rpc::HttpRpcServerFactory;
use crate::shell::{commands, editor, Command, History};
use console::style;
use rustyline::error::ReadlineError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interactive console over an optional remote_api connection.
pub struct Repl<'e> {
    env: &'e dyn Environment,
    stub: Option<RemoteApiStub>,
    persist_history: bool,
}

impl<'e> Repl<'e> {
    pub fn new(env: &'e dyn Environment) -> Self {
        Self {
            env,
            stub: None,
            persist_history: true,
        }
    }

    /// Toggle loading and writing the history file.
    pub fn persist_history(mut self, enabled: bool) -> Self {
        self.persist_history = enabled;
        self
    }

    /// Start the session with an already-configured connection.
    pub fn set_connection(&mut self, stub: RemoteApiStub) {
        self.stub = Some(stub);
    }

    /// Run the console loop until quit or EOF.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();

        let mut editor = editor()?;
        let history = if self.persist_history {
            Some(History::attach(&mut editor, self.env)?)
        } else {
            None
        };

        loop {
            match editor.readline(&self.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line);

                    match commands::parse(line) {
                        Ok(Command::Quit) => break,
                        Ok(Command::Clear) => print!("\x1B[2J\x1B[1;1H"),
                        Ok(Command::History) => self.show_history(history.as_ref()),
                        Ok(command) => self.execute(command),
                        Err(e) => eprintln!("{}", style(e).red()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", style("use 'quit' or Ctrl-D to exit").yellow());
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{}", style(format!("read error: {e}")).red());
                    break;
                }
            }
        }

        if let Some(history) = &history {
            history.save(&mut editor)?;
        }
        println!("{}", style("Goodbye.").dim());
        Ok(())
    }

    fn print_banner(&self) {
        println!("GAE Console {VERSION}");
        println!("Remote API console for App Engine applications");
        println!("Type 'help' for commands, 'quit' to exit.\n");
    }

    fn prompt(&self) -> String {
        match &self.stub {
            Some(stub) => format!("gae:{}> ", stub.app_id()),
            None => "gae> ".to_string(),
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Connect {
                app_id,
                host,
                path,
                email,
                local_dev,
            } => self.cmd_connect(app_id, host, path, email, local_dev),
            Command::Status => self.cmd_status(),
            Command::Ping => self.cmd_ping(),
            Command::Info => self.cmd_info(),
            Command::Help { topic } => print_help(topic.as_deref()),
            Command::Unknown { input } => {
                eprintln!(
                    "{}",
                    style(format!("unknown command: {input} (try 'help')")).red()
                );
            }
            // Handled in the loop
            Command::Quit | Command::Clear | Command::History => {}
        }
    }

    fn cmd_connect(
        &mut self,
        app_id: String,
        host: Option<String>,
        path: Option<String>,
        email: Option<String>,
        local_dev: bool,
    ) {
        let mut options = if local_dev {
            ConnectOptions::local_dev(app_id)
        } else {
            ConnectOptions::new(app_id)
        };
        if let Some(host) = host {
            options = options.with_host(host);
        }
        if let Some(path) = path {
            options = options.with_path(path);
        }
        if let Some(email) = email {
            options = options.with_email(email);
        }

        match remote::configure(options, &HttpRpcServerFactory, &TerminalPrompt, self.env) {
            Ok(stub) => {
                println!(
                    "{} {} at {}",
                    style("connected:").green(),
                    stub.app_id(),
                    stub.host()
                );
                self.stub = Some(stub);
            }
            Err(e) => eprintln!("{}", style(format!("connect failed: {e}")).red()),
        }
    }

    fn cmd_status(&self) {
        match &self.stub {
            Some(stub) => println!("connected to {} at {}", stub.app_id(), stub.host()),
            None => println!("not connected (use 'connect <app_id>')"),
        }
    }

    fn cmd_ping(&self) {
        match &self.stub {
            Some(stub) => match stub.ping() {
                Ok(()) => println!("{}", style("endpoint ok").green()),
                Err(e) => eprintln!("{}", style(format!("ping failed: {e}")).red()),
            },
            None => println!("not connected (use 'connect <app_id>')"),
        }
    }

    fn cmd_info(&self) {
        match &self.stub {
            Some(stub) => {
                println!("app id : {}", stub.app_id());
                println!("host   : {}", stub.host());
                println!("path   : {}", stub.path());
            }
            None => println!("not connected (use 'connect <app_id>')"),
        }
    }

    fn show_history(&self, history: Option<&History>) {
        match history {
            Some(history) => match history.tail(20) {
                Ok(entries) if entries.is_empty() => println!("history is empty"),
                Ok(entries) => {
                    for entry in entries {
                        println!("{entry}");
                    }
                }
                Err(e) => eprintln!("{}", style(format!("history unavailable: {e}")).red()),
            },
            None => println!("history persistence is disabled"),
        }
    }
}

fn print_help(topic: Option<&str>) {
    if let Some("connect") = topic {
        println!("connect <app_id> [--host HOST] [--path PATH] [--email EMAIL] [--local-dev]");
        println!();
        println!("Configures the remote_api connection. Without --host the");
        println!("application is reached at <app_id>.appspot.com; --local-dev");
        println!("targets localhost:8080 instead. Credentials are prompted");
        println!("unless both email and password were supplied up front.");
        return;
    }

    println!("Console commands:");
    println!("  connect <app_id> [flags]  - configure a remote_api connection");
    println!("  status                    - show whether a connection is configured");
    println!("  ping                      - re-verify the configured endpoint");
    println!("  info                      - show the resolved connection parameters");
    println!("  history                   - show recent history entries");
    println!("  clear                     - clear the screen");
    println!("  help [connect]            - this message");
    println!("  quit                      - leave the console");
}
