//! Configuring a remote_api stub against an application backend.
//!
//! One linear flow: resolve the connection descriptor, build a server
//! through the factory, acquire and attach credentials, verify the
//! endpoint actually speaks remote_api, then mark the process as
//! running against a development remote_api. Delegate failures
//! propagate unmodified; the environment marker is only written after
//! verification succeeds.

use crate::auth::CredentialPrompt;
use crate::config::ConnectOptions;
use crate::env::Environment;
use crate::error::{ConsoleError, Result};
use crate::rpc::{RpcServer, RpcServerFactory};
use serde::Deserialize;
use tracing::{debug, info};

/// Environment variable marking the process once configured.
pub const SERVER_SOFTWARE_VAR: &str = "SERVER_SOFTWARE";

/// Value written to [`SERVER_SOFTWARE_VAR`].
pub const SERVER_SOFTWARE_VALUE: &str = "Development (remote_api)/1";

/// Body of the endpoint verification response.
#[derive(Debug, Deserialize)]
struct VerificationBody {
    app_id: String,
    rtok: serde_yaml::Value,
}

/// A configured stub bound to one application backend.
pub struct RemoteApiStub {
    app_id: String,
    host: String,
    path: String,
    server: Box<dyn RpcServer>,
}

impl std::fmt::Debug for RemoteApiStub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteApiStub")
            .field("app_id", &self.app_id)
            .field("host", &self.host)
            .field("path", &self.path)
            .field("server", &"<dyn RpcServer>")
            .finish()
    }
}

impl RemoteApiStub {
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// POST an opaque remote_api payload to the configured endpoint.
    ///
    /// The payload format belongs to the platform SDKs; the stub
    /// forwards bytes and returns the response bytes.
    pub fn call(&mut self, payload: Vec<u8>) -> Result<Vec<u8>> {
        self.server.post(&self.path, payload)
    }

    /// Re-run the endpoint verification against the live server.
    pub fn ping(&self) -> Result<()> {
        verify_endpoint(self.server.as_ref(), &self.path, &self.app_id).map(|_| ())
    }
}

/// Resolve `options`, authenticate, verify the endpoint, and mark the
/// process environment.
pub fn configure(
    options: ConnectOptions,
    factory: &dyn RpcServerFactory,
    prompt: &dyn CredentialPrompt,
    env: &dyn Environment,
) -> Result<RemoteApiStub> {
    let descriptor = options.resolve()?;
    info!(
        app_id = %descriptor.app_id,
        host = %descriptor.host,
        path = %descriptor.path,
        "configuring remote_api"
    );

    let mut server = factory.create(&descriptor.host)?;

    let account = descriptor.credentials.obtain(prompt)?;
    server.authenticate(&account)?;

    verify_endpoint(server.as_ref(), &descriptor.path, &descriptor.app_id)?;

    env.set_var(SERVER_SOFTWARE_VAR, SERVER_SOFTWARE_VALUE);
    info!(app_id = %descriptor.app_id, "remote_api configured");

    Ok(RemoteApiStub {
        app_id: descriptor.app_id,
        host: descriptor.host,
        path: descriptor.path,
        server,
    })
}

/// Ask the endpoint to echo a one-time token and name its application.
///
/// The handler answers a `GET <path>?rtok=<token>` with a YAML body
/// `{app_id, rtok}`. A missing echo means the path is not a
/// remote_api handler; a foreign app id means the host serves a
/// different application.
fn verify_endpoint(server: &dyn RpcServer, path: &str, app_id: &str) -> Result<String> {
    let token = format!("{:016x}", rand::random::<u64>());
    debug!(%path, %token, "verifying endpoint");

    let body = server.get(path, &[("rtok", &token)])?;
    let parsed: VerificationBody =
        serde_yaml::from_str(&body).map_err(|e| ConsoleError::Protocol(e.to_string()))?;

    let echoed = yaml_scalar(&parsed.rtok);
    if echoed != token {
        return Err(ConsoleError::Handshake {
            sent: token,
            got: echoed,
        });
    }
    if parsed.app_id != app_id {
        return Err(ConsoleError::AppIdMismatch {
            requested: app_id.to_string(),
            reported: parsed.app_id,
        });
    }

    Ok(parsed.app_id)
}

/// The echoed token may arrive unquoted and parse as a number.
fn yaml_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
