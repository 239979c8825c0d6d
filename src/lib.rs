/*!
 * gae-console - Interactive console for App Engine remote_api endpoints
 *
 * Resolves connection parameters (application id, endpoint path and
 * host, credentials), configures a remote_api stub over HTTP, and
 * wraps it in an interactive console with tab completion, a
 * persistent history file, and a post-mortem panic hook.
 *
 * The remote wire protocol and the platform's authentication
 * handshake stay behind the `RpcServer` boundary; this crate only
 * parametrizes and delegates.
 */

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod hook;
pub mod logging;
pub mod remote;
pub mod rpc;
pub mod shell;

// Re-export commonly used types
pub use auth::{Account, CredentialPrompt, CredentialSource, TerminalPrompt};
pub use config::{
    ConnectOptions, ConnectionDescriptor, ConsoleConfig, DEFAULT_DEV_HOST, DEFAULT_ENDPOINT_PATH,
    PLATFORM_DOMAIN,
};
pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use error::{ConsoleError, Result};
pub use remote::{configure, RemoteApiStub, SERVER_SOFTWARE_VALUE, SERVER_SOFTWARE_VAR};
pub use rpc::{HttpRpcServer, HttpRpcServerFactory, RpcServer, RpcServerFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
