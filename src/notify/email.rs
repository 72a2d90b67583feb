// src/notify/email.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use crate::config::MailCredentials;

pub const GMAIL_SMTP_HOST: &str = "smtp.gmail.com";
pub const GMAIL_SMTP_PORT: u16 = 465;

/// Subject line for a digest sent on `date`.
pub fn subject_for(date: NaiveDate) -> String {
    format!("Research Digest - {}", date.format("%Y-%m-%d"))
}

/// multipart/alternative message carrying only the HTML part.
pub fn build_digest_message(
    from_addr: &str,
    to_addr: &str,
    subject: &str,
    html: &str,
) -> Result<Message> {
    let from: Mailbox = from_addr
        .parse()
        .with_context(|| format!("invalid sender address {from_addr}"))?;
    let to: Mailbox = to_addr
        .parse()
        .with_context(|| format!("invalid recipient address {to_addr}"))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(MultiPart::alternative().singlepart(SinglePart::html(html.to_string())))
        .context("build email")
}

/// Implicit-TLS transport to Gmail, authenticated with an app password.
pub fn gmail_transport(creds: &MailCredentials) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(GMAIL_SMTP_HOST)
        .context("invalid SMTP host")?
        .port(GMAIL_SMTP_PORT)
        .credentials(Credentials::new(
            creds.address.clone(),
            creds.app_password.clone(),
        ))
        .build();
    Ok(mailer)
}

/// Hand `msg` to `transport`. Errors are returned unchanged in kind, with context.
pub async fn send_message<T>(transport: &T, msg: Message) -> Result<()>
where
    T: AsyncTransport + Sync,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    transport.send(msg).await.context("send email")?;
    Ok(())
}
