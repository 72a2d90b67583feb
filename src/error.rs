//! Typed failures the pipeline distinguishes. Everything else travels as `anyhow::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the configuration document or values read from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Raised lazily, when a component asks for a key the document lacks.
    #[error("config key `{0}` is missing")]
    MissingKey(&'static str),

    #[error("Unknown email method: {0}. Use 'print' or 'gmail'")]
    UnknownEmailMethod(String),
}

/// A secret required by the selected code path is absent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("GEMINI_API_KEY not found in environment variables")]
    MissingApiKey,

    #[error("Gmail credentials not found. Set GMAIL_ADDRESS and GMAIL_APP_PASSWORD")]
    MissingMailCredentials,
}
