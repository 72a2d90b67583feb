//! Research Digest: binary entrypoint.
//! Loads `.env`, sets up logging, reads credentials and runs the pipeline once.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use research_digest::cli::Cli;
use research_digest::ingest::providers::HttpTransport;
use research_digest::{pipeline, Secrets};

/// Diagnostics go to stderr so stdout carries only the run's console lines.
/// Quiet by default; `RUST_LOG=research_digest=debug` shows per-feed detail.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local runs keep secrets in .env; CI injects them directly.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Cli::parse();
    tracing::debug!(?args, "parsed cli");

    let secrets = Secrets::from_env();
    let transport = HttpTransport::new()?;

    pipeline::run(&args.config, &args.model, &transport, &secrets).await
}
