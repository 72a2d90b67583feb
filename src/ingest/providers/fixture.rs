// src/ingest/providers/fixture.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::ingest::types::FeedTransport;

/// In-memory transport: serves registered bodies by URL and remembers what was
/// requested. Unknown URLs fail like an unreachable host would.
#[derive(Default)]
pub struct FixtureTransport {
    bodies: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FeedTransport for FixtureTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Ok(mut g) = self.requested.lock() {
            g.push(url.to_string());
        }
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("no fixture registered for {url}"))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
