//! Credential strategy and interactive acquisition.
//!
//! Credentials are an explicit strategy value selected when the
//! connection parameters are resolved: either a fixed pair supplied
//! up front, or an interactive prompt deferred until the configurator
//! actually needs them.

use crate::error::{ConsoleError, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use secrecy::SecretString;

/// A resolved account credential pair.
///
/// The password never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password: SecretString,
}

impl Account {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }
}

/// How credentials are acquired when the configurator needs them.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Use the supplied pair as-is, never prompting.
    Fixed(Account),

    /// Ask at acquisition time: email visible, password masked.
    Interactive,
}

impl CredentialSource {
    /// Fixed when both parts were supplied, interactive otherwise.
    pub fn from_parts(email: Option<String>, password: Option<SecretString>) -> Self {
        match (email, password) {
            (Some(email), Some(password)) => CredentialSource::Fixed(Account { email, password }),
            _ => CredentialSource::Interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, CredentialSource::Interactive)
    }

    /// Produce the credential pair, prompting only for the
    /// interactive variant.
    pub fn obtain(&self, prompt: &dyn CredentialPrompt) -> Result<Account> {
        match self {
            CredentialSource::Fixed(account) => Ok(account.clone()),
            CredentialSource::Interactive => {
                let email = prompt.read_email()?;
                let password = prompt.read_password()?;
                Ok(Account { email, password })
            }
        }
    }
}

/// Terminal seam for interactive acquisition, so tests can drive the
/// prompt with a fake.
pub trait CredentialPrompt {
    fn read_email(&self) -> Result<String>;
    fn read_password(&self) -> Result<SecretString>;
}

/// Real terminal prompt: visible email input, masked password input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn read_email(&self) -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| ConsoleError::Credential(e.to_string()))
    }

    fn read_password(&self) -> Result<SecretString> {
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()
            .map(|p| SecretString::new(p.into_boxed_str()))
            .map_err(|e| ConsoleError::Credential(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    struct CannedPrompt;

    impl CredentialPrompt for CannedPrompt {
        fn read_email(&self) -> Result<String> {
            Ok("dev@example.com".to_string())
        }

        fn read_password(&self) -> Result<SecretString> {
            Ok(SecretString::new("hunter2".to_string().into_boxed_str()))
        }
    }

    struct UnreachablePrompt;

    impl CredentialPrompt for UnreachablePrompt {
        fn read_email(&self) -> Result<String> {
            panic!("fixed credentials must not prompt");
        }

        fn read_password(&self) -> Result<SecretString> {
            panic!("fixed credentials must not prompt");
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into_boxed_str())
    }

    #[test]
    fn both_parts_give_fixed() {
        let source =
            CredentialSource::from_parts(Some("a@b.com".to_string()), Some(secret("pw")));
        assert!(!source.is_interactive());

        let account = source.obtain(&UnreachablePrompt).unwrap();
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.password.expose_secret(), "pw");
    }

    #[test]
    fn missing_password_gives_interactive() {
        let source = CredentialSource::from_parts(Some("a@b.com".to_string()), None);
        assert!(source.is_interactive());
    }

    #[test]
    fn missing_email_gives_interactive() {
        let source = CredentialSource::from_parts(None, Some(secret("pw")));
        assert!(source.is_interactive());
    }

    #[test]
    fn interactive_obtains_from_prompt() {
        let account = CredentialSource::Interactive.obtain(&CannedPrompt).unwrap();
        assert_eq!(account.email, "dev@example.com");
        assert_eq!(account.password.expose_secret(), "hunter2");
    }

    #[test]
    fn password_redacted_in_debug() {
        let account = Account::new("a@b.com", "s3cr3t");
        let rendered = format!("{account:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("a@b.com"));
    }
}
