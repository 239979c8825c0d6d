//! Error types for the console.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("application id is required")]
    MissingAppId,

    #[error("invalid endpoint host: {0:?}")]
    InvalidHost(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("credential acquisition failed: {0}")]
    Credential(String),

    #[error("rpc to {host} failed: {reason}")]
    Rpc { host: String, reason: String },

    #[error("unexpected endpoint response: {0}")]
    Protocol(String),

    #[error("endpoint did not echo the verification token (sent {sent}, got {got})")]
    Handshake { sent: String, got: String },

    #[error("endpoint belongs to application {reported}, not {requested}")]
    AppIdMismatch { requested: String, reported: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
