//! Connection parameter resolution and the console config file.

use crate::auth::CredentialSource;
use crate::error::{ConsoleError, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known path of the remote_api handler.
pub const DEFAULT_ENDPOINT_PATH: &str = "/_ah/remote_api";

/// Address of the local development server.
pub const DEFAULT_DEV_HOST: &str = "localhost:8080";

/// Domain hosted applications are reachable under.
pub const PLATFORM_DOMAIN: &str = "appspot.com";

/// Caller-supplied connection parameters, before resolution.
///
/// Only the application id is required; everything else falls back to
/// the platform defaults when resolved.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub app_id: String,
    pub host: Option<String>,
    pub path: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl ConnectOptions {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            host: None,
            path: None,
            email: None,
            password: None,
        }
    }

    /// Target the local development server instead of the hosted
    /// application.
    pub fn local_dev(app_id: impl Into<String>) -> Self {
        Self::new(app_id).with_host(DEFAULT_DEV_HOST)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Resolve into a complete descriptor.
    ///
    /// An explicit host is used unchanged; without one the hosted
    /// address `<app_id>.appspot.com` is derived. The endpoint path
    /// defaults to [`DEFAULT_ENDPOINT_PATH`]. Credentials become a
    /// fixed pair only when both parts were supplied.
    pub fn resolve(self) -> Result<ConnectionDescriptor> {
        if self.app_id.trim().is_empty() {
            return Err(ConsoleError::MissingAppId);
        }

        let host = match self.host {
            Some(host) if host.trim().is_empty() => return Err(ConsoleError::InvalidHost(host)),
            Some(host) => host,
            None => format!("{}.{}", self.app_id, PLATFORM_DOMAIN),
        };

        Ok(ConnectionDescriptor {
            app_id: self.app_id,
            host,
            path: self.path.unwrap_or_else(|| DEFAULT_ENDPOINT_PATH.to_string()),
            credentials: CredentialSource::from_parts(self.email, self.password),
        })
    }
}

/// Fully resolved connection parameters, consumed by one configure
/// call.
#[derive(Debug)]
pub struct ConnectionDescriptor {
    pub app_id: String,
    pub host: String,
    pub path: String,
    pub credentials: CredentialSource,
}

/// Persisted console defaults, merged under explicit options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Default application id for the startup connection
    #[serde(default)]
    pub app_id: Option<String>,

    /// Default endpoint host
    #[serde(default)]
    pub host: Option<String>,

    /// Default remote_api handler path
    #[serde(default)]
    pub path: Option<String>,

    /// Default account email (the password is always prompted)
    #[serde(default)]
    pub email: Option<String>,

    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl ConsoleConfig {
    /// Default config file location, `~/.gae-console/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".gae-console").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ConsoleError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConsoleError::Config(format!("serializing config: {e}")))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn default_host_derives_from_app_id() {
        let descriptor = ConnectOptions::new("myapp").resolve().unwrap();
        assert_eq!(descriptor.host, "myapp.appspot.com");
    }

    #[test]
    fn explicit_host_used_unchanged() {
        let descriptor = ConnectOptions::new("myapp")
            .with_host("api.example.com:8443")
            .resolve()
            .unwrap();
        assert_eq!(descriptor.host, "api.example.com:8443");
    }

    #[test]
    fn local_dev_targets_dev_server() {
        let descriptor = ConnectOptions::local_dev("myapp").resolve().unwrap();
        assert_eq!(descriptor.host, DEFAULT_DEV_HOST);
    }

    #[test]
    fn default_path_is_remote_api_handler() {
        let descriptor = ConnectOptions::new("myapp").resolve().unwrap();
        assert_eq!(descriptor.path, "/_ah/remote_api");
    }

    #[test]
    fn explicit_path_used_unchanged() {
        let descriptor = ConnectOptions::new("myapp")
            .with_path("/custom/remote")
            .resolve()
            .unwrap();
        assert_eq!(descriptor.path, "/custom/remote");
    }

    #[test]
    fn empty_app_id_rejected() {
        let err = ConnectOptions::new("  ").resolve().unwrap_err();
        assert!(matches!(err, ConsoleError::MissingAppId));
    }

    #[test]
    fn empty_host_rejected() {
        let err = ConnectOptions::new("myapp")
            .with_host("")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidHost(_)));
    }

    #[test]
    fn full_pair_resolves_to_fixed_credentials() {
        let descriptor = ConnectOptions::new("myapp")
            .with_email("dev@example.com")
            .with_password(SecretString::new("pw".to_string().into_boxed_str()))
            .resolve()
            .unwrap();
        assert!(!descriptor.credentials.is_interactive());
    }

    #[test]
    fn partial_pair_resolves_to_interactive() {
        let descriptor = ConnectOptions::new("myapp")
            .with_email("dev@example.com")
            .resolve()
            .unwrap();
        assert!(descriptor.credentials.is_interactive());
    }

    #[test]
    fn config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ConsoleConfig {
            app_id: Some("myapp".to_string()),
            host: None,
            path: Some("/custom/remote".to_string()),
            email: Some("dev@example.com".to_string()),
            verbose: true,
        };
        config.to_file(&path).unwrap();

        let loaded = ConsoleConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConsoleConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, ConsoleConfig::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "app_id = [not toml").unwrap();

        let err = ConsoleConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }
}
