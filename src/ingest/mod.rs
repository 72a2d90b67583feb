// src/ingest/mod.rs
pub mod parser;
pub mod providers;
pub mod types;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use std::io::Write;

use crate::config::FeedSource;
use crate::ingest::types::{FeedTransport, PaperRecord};

pub use parser::parse_feed;

/// At most this many entries are taken from the top of each feed.
pub const MAX_ENTRIES_PER_FEED: usize = 50;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "digest_feed_entries_total",
            "Feed entries turned into paper records."
        );
        describe_counter!(
            "digest_feed_errors_total",
            "Feed retrieval or parse failures."
        );
        describe_histogram!("digest_feed_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Fetch every feed in order and flatten the entries into paper records.
///
/// Output is all records of the first feed, then all of the second, and so on.
/// The first feed that cannot be fetched or parsed aborts the whole call.
/// Progress lines go to stdout.
pub async fn fetch_papers(
    transport: &dyn FeedTransport,
    feeds: &[FeedSource],
) -> Result<Vec<PaperRecord>> {
    fetch_papers_with_progress(transport, feeds, &mut std::io::stdout()).await
}

/// [`fetch_papers`] with progress lines written to `out`.
pub async fn fetch_papers_with_progress<W: Write>(
    transport: &dyn FeedTransport,
    feeds: &[FeedSource],
    out: &mut W,
) -> Result<Vec<PaperRecord>> {
    ensure_metrics_described();

    let mut papers = Vec::new();
    for feed in feeds {
        writeln!(out, "Fetching from {}...", feed.name)?;

        let fetched = transport
            .fetch(&feed.url)
            .await
            .with_context(|| format!("fetching feed {} ({})", feed.name, feed.url))
            .and_then(|body| parse_feed(&body, &feed.name, MAX_ENTRIES_PER_FEED));
        let mut records = match fetched {
            Ok(v) => v,
            Err(e) => {
                counter!("digest_feed_errors_total").increment(1);
                return Err(e);
            }
        };

        tracing::debug!(
            feed = %feed.name,
            transport = transport.name(),
            entries = records.len(),
            "feed parsed"
        );
        papers.append(&mut records);
    }
    Ok(papers)
}
