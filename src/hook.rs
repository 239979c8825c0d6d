//! Process-wide panic hook with post-mortem inspection.
//!
//! Installing the hook replaces the default panic behavior for the
//! remainder of the process: the panic report goes to stderr, then,
//! when running on a terminal, a small line-oriented prompt lets the
//! user inspect the captured report before the process unwinds.
//! Acceptable for an interactive developer tool; a service should
//! never install this.

use console::style;
use std::backtrace::Backtrace;
use std::io::{self, BufRead, IsTerminal, Write};
use std::panic::PanicHookInfo;

/// What the hook captured about a panic.
#[derive(Debug, Clone)]
pub struct PanicReport {
    pub message: String,
    pub location: String,
    pub backtrace: String,
}

impl PanicReport {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "(no message available)".to_string()
        };

        let location = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            message,
            location,
            backtrace: Backtrace::force_capture().to_string(),
        }
    }

    /// Render the report exactly as it is written to stderr.
    pub fn render(&self) -> String {
        format!(
            "panic: {}\n  at {}\n\nBacktrace:\n{}",
            self.message, self.location, self.backtrace
        )
    }
}

/// Replace the process panic hook.
///
/// With `post_mortem` the hook opens the inspection prompt after
/// printing, but only when both stdin and stderr are terminals.
pub fn install(post_mortem: bool) {
    std::panic::set_hook(Box::new(move |info| {
        let _ = io::stdout().flush();

        let report = PanicReport::capture(info);
        eprintln!("{}", report.render());
        let _ = io::stderr().flush();

        if post_mortem && io::stdin().is_terminal() && io::stderr().is_terminal() {
            post_mortem_prompt(&report, io::stdin().lock());
        }
    }));
}

/// Restore the default panic hook.
pub fn uninstall() {
    let _ = std::panic::take_hook();
}

/// Line-oriented inspection of a captured panic report.
fn post_mortem_prompt(report: &PanicReport, input: impl BufRead) {
    eprintln!(
        "{}",
        style("post-mortem: bt, msg, loc, env KEY, quit").dim()
    );

    let mut lines = input.lines();
    loop {
        eprint!("(pm) ");
        let _ = io::stderr().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };

        match line.trim() {
            "" => {}
            "bt" | "backtrace" => eprintln!("{}", report.backtrace),
            "msg" | "message" => eprintln!("{}", report.message),
            "loc" | "where" => eprintln!("{}", report.location),
            "q" | "quit" | "exit" => break,
            other => {
                if let Some(key) = other.strip_prefix("env ") {
                    match std::env::var(key.trim()) {
                        Ok(value) => eprintln!("{value}"),
                        Err(_) => eprintln!("{} is unset", key.trim()),
                    }
                } else {
                    eprintln!("unknown command: {other}");
                }
            }
        }
    }
}
