// src/pipeline.rs
//! The whole run: config → feeds → ranking → HTML → delivery, strictly in order.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::io::Write;
use std::path::Path;

use crate::config::{load_config, Config, Secrets};
use crate::ingest::{fetch_papers_with_progress, types::FeedTransport};
use crate::notify::deliver;
use crate::rank::{rank_papers, GeminiClient, ModelClient};
use crate::render::render_digest;

/// Everything a run needs from outside the config document.
pub struct RunContext<'a, W: Write> {
    pub transport: &'a dyn FeedTransport,
    pub model: &'a dyn ModelClient,
    pub secrets: &'a Secrets,
    pub today: NaiveDate,
    pub out: &'a mut W,
}

/// Run the pipeline for an already loaded config. Returns the rendered HTML.
pub async fn run_with<W: Write>(config: &Config, ctx: RunContext<'_, W>) -> Result<String> {
    let RunContext {
        transport,
        model,
        secrets,
        today,
        out,
    } = ctx;

    writeln!(out, "Configuration loaded for: {}", config.email()?)?;

    let feeds = config.feeds()?;
    let papers = fetch_papers_with_progress(transport, feeds, out).await?;
    writeln!(
        out,
        "Fetched {} papers from {} sources",
        papers.len(),
        feeds.len()
    )?;

    writeln!(out, "Analyzing papers with AI...")?;
    let digest = rank_papers(
        model,
        &papers,
        config.research_interests()?,
        config.max_papers()?,
    )
    .await?;

    let html = render_digest(&digest, today);
    deliver(&html, config, secrets, today, out).await?;

    writeln!(out, "Digest generation complete!")?;
    Ok(html)
}

/// Production entry: load the config at `config_path`, talk to Gemini with
/// `model_name`, fetch feeds with `transport`, print to stdout.
pub async fn run(
    config_path: &Path,
    model_name: &str,
    transport: &dyn FeedTransport,
    secrets: &Secrets,
) -> Result<()> {
    run_to(config_path, model_name, transport, secrets, &mut std::io::stdout()).await
}

/// [`run`] with console lines written to `out`.
///
/// A missing `GEMINI_API_KEY` is reported by the ranking step, after the
/// configuration line and the feed fetches.
pub async fn run_to<W: Write>(
    config_path: &Path,
    model_name: &str,
    transport: &dyn FeedTransport,
    secrets: &Secrets,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Starting Research Digest Generator...")?;

    let config = load_config(config_path)?;
    let model = GeminiClient::new(secrets.gemini_api_key.as_deref(), model_name)
        .context("setting up the ranking client")?;

    run_with(
        &config,
        RunContext {
            transport,
            model: &model,
            secrets,
            today: Local::now().date_naive(),
            out,
        },
    )
    .await?;
    Ok(())
}
