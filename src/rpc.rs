//! Delegate boundary to the remote_api transport.
//!
//! The wire protocol and the platform's authentication handshake live
//! behind [`RpcServer`]; the console only selects a host, attaches
//! credentials, and forwards requests. [`HttpRpcServer`] is the
//! default implementation, a thin blocking-HTTP shim with no retry
//! and no pooling beyond the client's own connection reuse.

use crate::auth::Account;
use crate::error::{ConsoleError, Result};
use secrecy::ExposeSecret;
use tracing::debug;

/// A server stub able to reach one remote_api endpoint host.
pub trait RpcServer: std::fmt::Debug {
    /// Attach credentials for subsequent requests.
    fn authenticate(&mut self, account: &Account) -> Result<()>;

    /// Issue a GET against `path` and return the response body.
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String>;

    /// POST an opaque payload to `path` and return the response bytes.
    fn post(&mut self, path: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Builds [`RpcServer`] instances for a resolved host.
pub trait RpcServerFactory {
    fn create(&self, host: &str) -> Result<Box<dyn RpcServer>>;
}

/// Default factory producing [`HttpRpcServer`] instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpRpcServerFactory;

impl RpcServerFactory for HttpRpcServerFactory {
    fn create(&self, host: &str) -> Result<Box<dyn RpcServer>> {
        Ok(Box::new(HttpRpcServer::new(host)?))
    }
}

/// Blocking HTTP transport for a single endpoint host.
///
/// Hosted endpoints are reached over https; the local development
/// server over plain http. Credentials attach as HTTP basic auth on
/// every request once [`RpcServer::authenticate`] has run.
#[derive(Debug)]
pub struct HttpRpcServer {
    host: String,
    base: String,
    client: reqwest::blocking::Client,
    account: Option<Account>,
}

impl HttpRpcServer {
    pub fn new(host: &str) -> Result<Self> {
        if host.trim().is_empty() {
            return Err(ConsoleError::InvalidHost(host.to_string()));
        }

        let scheme = if is_dev_host(host) { "http" } else { "https" };
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gae-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConsoleError::Rpc {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            host: host.to_string(),
            base: format!("{scheme}://{host}"),
            client,
            account: None,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    fn rpc_error(&self, reason: impl ToString) -> ConsoleError {
        ConsoleError::Rpc {
            host: self.host.clone(),
            reason: reason.to_string(),
        }
    }

    fn with_auth(&self, request: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match &self.account {
            Some(account) => {
                request.basic_auth(&account.email, Some(account.password.expose_secret()))
            }
            None => request,
        }
    }
}

impl RpcServer for HttpRpcServer {
    fn authenticate(&mut self, account: &Account) -> Result<()> {
        debug!(host = %self.host, email = %account.email, "attaching credentials");
        self.account = Some(account.clone());
        Ok(())
    }

    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .with_auth(self.client.get(&url).query(query))
            .send()
            .map_err(|e| self.rpc_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rpc_error(format!("endpoint returned {status}")));
        }
        response.text().map_err(|e| self.rpc_error(e))
    }

    fn post(&mut self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = self.url(path);
        debug!(%url, bytes = body.len(), "POST");

        let response = self
            .with_auth(self.client.post(&url).body(body))
            .send()
            .map_err(|e| self.rpc_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.rpc_error(format!("endpoint returned {status}")));
        }
        Ok(response.bytes().map_err(|e| self.rpc_error(e))?.to_vec())
    }
}

/// Local development addresses skip TLS.
fn is_dev_host(host: &str) -> bool {
    host == "localhost"
        || host == "127.0.0.1"
        || host.starts_with("localhost:")
        || host.starts_with("127.0.0.1:")
}
