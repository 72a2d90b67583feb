// src/ingest/providers/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::ingest::types::FeedTransport;

const USER_AGENT: &str = concat!(
    "research-digest/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/zytynski/research-digest)"
);

/// Plain GET over reqwest. Non-2xx responses are errors.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = ?e, url, "feed http error");
                return Err(e).with_context(|| format!("GET {url}"));
            }
        };
        let resp = resp
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        resp.text()
            .await
            .with_context(|| format!("reading body of {url}"))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
