// src/ingest/types.rs
use anyhow::Result;

/// One feed entry, flattened. Missing fields are empty strings.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct PaperRecord {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String, // FeedSource::name
}

/// Fetches the raw body of a feed URL.
#[async_trait::async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
    fn name(&self) -> &'static str;
}
