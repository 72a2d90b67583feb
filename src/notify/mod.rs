// src/notify/mod.rs
//! Delivery of the rendered digest: console preview or Gmail.

pub mod email;

use anyhow::Result;
use chrono::NaiveDate;
use lettre::AsyncTransport;
use std::io::Write;
use std::str::FromStr;

use crate::config::{Config, MailCredentials, Secrets};
use crate::error::ConfigError;

/// Characters of HTML shown in print mode.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Print,
    Gmail,
}

impl FromStr for DeliveryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "print" => Ok(Self::Print),
            "gmail" => Ok(Self::Gmail),
            other => Err(ConfigError::UnknownEmailMethod(other.to_string())),
        }
    }
}

impl DeliveryMode {
    /// Mode named by `email_method`; absent means [`DeliveryMode::Print`].
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        cfg.email_method
            .as_deref()
            .map_or(Ok(Self::default()), str::parse)
    }
}

/// Deliver `html` the way the configuration asks for.
///
/// Console lines go to `out`. In gmail mode credentials are checked before any
/// connection is made.
pub async fn deliver<W: Write>(
    html: &str,
    config: &Config,
    secrets: &Secrets,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    match DeliveryMode::from_config(config)? {
        DeliveryMode::Print => print_preview(html, config.email()?, out),
        DeliveryMode::Gmail => {
            let creds = secrets.mail_credentials()?;
            let transport = email::gmail_transport(&creds)?;
            send_digest(&transport, &creds, config.email()?, html, today, out).await
        }
    }
}

/// Print mode: no network, just the recipient and the start of the HTML.
pub fn print_preview<W: Write>(html: &str, recipient: &str, out: &mut W) -> Result<()> {
    let preview: String = html.chars().take(PREVIEW_CHARS).collect();
    writeln!(out, "Email generation successful!")?;
    writeln!(out, "Would send to: {recipient}")?;
    writeln!(out, "\nPreview:")?;
    writeln!(out, "{preview}")?;
    Ok(())
}

/// Build the digest message and send it through `transport`.
/// A send failure is reported on `out`, logged, and returned.
pub async fn send_digest<T, W>(
    transport: &T,
    creds: &MailCredentials,
    recipient: &str,
    html: &str,
    today: NaiveDate,
    out: &mut W,
) -> Result<()>
where
    T: AsyncTransport + Sync,
    T::Error: std::error::Error + Send + Sync + 'static,
    W: Write,
{
    let subject = email::subject_for(today);
    let msg = email::build_digest_message(&creds.address, recipient, &subject, html)?;

    match email::send_message(transport, msg).await {
        Ok(()) => {
            tracing::info!(to = recipient, subject = %subject, "digest email sent");
            writeln!(out, "Email sent successfully to {recipient}")?;
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = ?e, to = recipient, "digest email failed");
            writeln!(out, "Failed to send email: {e:#}")?;
            Err(e)
        }
    }
}
