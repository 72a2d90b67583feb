// src/rank/mod.rs
//! Ranking client: one prompt, one model call, raw text back.

pub mod gemini;
pub mod prompt;

use anyhow::{Context, Result};
use tracing::info;

use crate::ingest::types::PaperRecord;

pub use gemini::{GeminiClient, MockModel, ModelClient, DEFAULT_MODEL};
pub use prompt::build_prompt;

/// Candidates beyond this many (in fetch order) are never shown to the model.
pub const MAX_CANDIDATES: usize = 150;

/// Ask the model to pick the best `max_papers` papers for `research_interests`.
///
/// The reply is returned verbatim. Its shape is whatever the model produced.
pub async fn rank_papers(
    model: &dyn ModelClient,
    papers: &[PaperRecord],
    research_interests: &str,
    max_papers: u32,
) -> Result<String> {
    let candidates = &papers[..papers.len().min(MAX_CANDIDATES)];
    let prompt = build_prompt(candidates, research_interests, max_papers);

    info!(
        model = model.model_name(),
        candidates = candidates.len(),
        dropped = papers.len() - candidates.len(),
        prompt_chars = prompt.len(),
        "ranking papers"
    );

    let digest = model
        .generate(&prompt)
        .await
        .with_context(|| format!("ranking with {}", model.model_name()))?;

    info!(reply_chars = digest.len(), "model replied");
    Ok(digest)
}
