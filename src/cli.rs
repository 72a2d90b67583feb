//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::rank::DEFAULT_MODEL;

/// Ranks this week's papers from your feeds against your research interests
/// and delivers the digest.
///
/// Credentials come from the environment (or a `.env` file): `GEMINI_API_KEY`,
/// plus `GMAIL_ADDRESS` and `GMAIL_APP_PASSWORD` when `email_method: gmail`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the configuration file (YAML, TOML or JSON)
    #[arg(short, long, env = "DIGEST_CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Gemini model used for ranking
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
}
