// src/config/secrets.rs
use std::env;

use crate::error::CredentialError;

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GMAIL_ADDRESS: &str = "GMAIL_ADDRESS";
pub const ENV_GMAIL_APP_PASSWORD: &str = "GMAIL_APP_PASSWORD";

/// Credentials read from the environment once, at startup, and handed to the
/// components that need them.
#[derive(Clone, Default)]
pub struct Secrets {
    pub gemini_api_key: Option<String>,
    pub gmail_address: Option<String>,
    pub gmail_app_password: Option<String>,
}

/// Sender address + app password, both present.
#[derive(Clone)]
pub struct MailCredentials {
    pub address: String,
    pub app_password: String,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: non_empty_var(ENV_GEMINI_API_KEY),
            gmail_address: non_empty_var(ENV_GMAIL_ADDRESS),
            gmail_app_password: non_empty_var(ENV_GMAIL_APP_PASSWORD),
        }
    }

    pub fn mail_credentials(&self) -> Result<MailCredentials, CredentialError> {
        match (&self.gmail_address, &self.gmail_app_password) {
            (Some(address), Some(app_password)) => Ok(MailCredentials {
                address: address.clone(),
                app_password: app_password.clone(),
            }),
            _ => Err(CredentialError::MissingMailCredentials),
        }
    }
}

// Never print secret values.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|k| k.len()))
            .field("gmail_address", &self.gmail_address)
            .field("gmail_app_password", &self.gmail_app_password.is_some())
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[serial_test::serial]
    #[test]
    fn empty_env_values_count_as_absent() {
        env::set_var(ENV_GEMINI_API_KEY, "");
        env::set_var(ENV_GMAIL_ADDRESS, "sender@gmail.com");
        env::remove_var(ENV_GMAIL_APP_PASSWORD);

        let s = Secrets::from_env();
        assert!(s.gemini_api_key.is_none());
        assert_eq!(s.gmail_address.as_deref(), Some("sender@gmail.com"));
        assert_eq!(
            s.mail_credentials().err(),
            Some(CredentialError::MissingMailCredentials)
        );

        env::remove_var(ENV_GEMINI_API_KEY);
        env::remove_var(ENV_GMAIL_ADDRESS);
    }

    #[serial_test::serial]
    #[test]
    fn values_are_passed_through_untrimmed() {
        env::set_var(ENV_GMAIL_ADDRESS, "sender@gmail.com");
        env::set_var(ENV_GMAIL_APP_PASSWORD, " abcd efgh ");
        env::set_var(ENV_GEMINI_API_KEY, "   ");

        let s = Secrets::from_env();
        assert!(s.gemini_api_key.is_none());
        let creds = s.mail_credentials().unwrap();
        assert_eq!(creds.app_password, " abcd efgh ");

        env::remove_var(ENV_GEMINI_API_KEY);
        env::remove_var(ENV_GMAIL_ADDRESS);
        env::remove_var(ENV_GMAIL_APP_PASSWORD);
    }

    #[test]
    fn debug_hides_values() {
        let s = Secrets {
            gemini_api_key: Some("sk-123456".into()),
            gmail_address: None,
            gmail_app_password: Some("hunter2".into()),
        };
        let out = format!("{s:?}");
        assert!(!out.contains("sk-123456"));
        assert!(!out.contains("hunter2"));
    }
}
