/*!
 * gae-console CLI - interactive console entry point
 */

use anyhow::{Context, Result};
use clap::Parser;
use gae_console::{
    config::ConsoleConfig, env::ProcessEnv, hook, logging, remote, rpc::HttpRpcServerFactory,
    shell::Repl, ConnectOptions, TerminalPrompt,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gae-console")]
#[command(version, about = "Interactive console for App Engine remote_api endpoints", long_about = None)]
struct Cli {
    /// Application id to connect to on startup
    #[arg(short = 'a', long = "app-id", value_name = "APP_ID")]
    app_id: Option<String>,

    /// Endpoint host (defaults to <app_id>.appspot.com)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Path of the remote_api handler (defaults to /_ah/remote_api)
    #[arg(long, value_name = "PATH")]
    path: Option<String>,

    /// Account email (the password is prompted; omit both for a full prompt)
    #[arg(long, value_name = "EMAIL")]
    email: Option<String>,

    /// Target the local development server (localhost:8080)
    #[arg(long)]
    local_dev: bool,

    /// Do not load or persist the history file
    #[arg(long)]
    no_history: bool,

    /// Do not install the post-mortem panic hook
    #[arg(long)]
    no_hook: bool,

    /// Config file (defaults to ~/.gae-console/config.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(ConsoleConfig::default_path) {
        Some(path) => ConsoleConfig::load_or_default(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConsoleConfig::default(),
    };

    logging::init(cli.verbose || config.verbose)?;

    if !cli.no_hook {
        hook::install(true);
    }

    let env = ProcessEnv;
    let mut repl = Repl::new(&env).persist_history(!cli.no_history);

    // Explicit flags win over config-file defaults.
    if let Some(app_id) = cli.app_id.or(config.app_id) {
        let mut options = if cli.local_dev {
            ConnectOptions::local_dev(app_id)
        } else {
            ConnectOptions::new(app_id)
        };
        if let Some(host) = cli.host.or(config.host) {
            options = options.with_host(host);
        }
        if let Some(path) = cli.path.or(config.path) {
            options = options.with_path(path);
        }
        if let Some(email) = cli.email.or(config.email) {
            options = options.with_email(email);
        }

        let stub = remote::configure(options, &HttpRpcServerFactory, &TerminalPrompt, &env)
            .context("failed to configure remote_api")?;
        repl.set_connection(stub);
    }

    repl.run()?;
    Ok(())
}
