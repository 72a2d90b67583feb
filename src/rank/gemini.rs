// src/rank/gemini.rs
//! Model seam: the trait the ranker calls, the Gemini REST client, and a mock.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Generates free-form text for a prompt. One call, no retries.
pub trait ModelClient: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
    /// Model name for diagnostics.
    fn model_name(&self) -> &str;
}

/// Gemini `generateContent` client. A missing API key surfaces on the first
/// [`ModelClient::generate`] call, before any request is sent.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("key_len", &self.api_key.as_ref().map(String::len))
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<&str>, model: &str) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string);
        let http = reqwest::Client::builder()
            .user_agent(concat!("research-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building gemini http client")?;
        Ok(Self {
            http,
            api_key,
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}
#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}
#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}
#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Concatenated text of the first candidate.
fn response_text(body: GenerateResponse) -> Result<String> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("gemini returned no candidates"))?;
    let parts = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default();
    if parts.is_empty() {
        return Err(anyhow!("gemini candidate has no text parts"));
    }
    Ok(parts.into_iter().map(|p| p.text).collect())
}

impl ModelClient for GeminiClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self
                .api_key
                .as_deref()
                .ok_or(CredentialError::MissingApiKey)?;
            let req = GenerateRequest {
                contents: vec![Content {
                    parts: vec![Part { text: prompt }],
                }],
            };

            let resp = self
                .http
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&req)
                .send()
                .await
                .context("gemini request failed")?;

            let status = resp.status();
            if !status.is_success() {
                let detail = resp.text().await.unwrap_or_default();
                return Err(anyhow!("gemini returned {status}: {detail}"));
            }

            let body: GenerateResponse = resp.json().await.context("decoding gemini response")?;
            response_text(body)
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Returns a fixed reply and remembers every prompt it saw.
pub struct MockModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl ModelClient for MockModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        if let Ok(mut g) = self.prompts.lock() {
            g.push(prompt.to_string());
        }
        let out = self.reply.clone();
        Box::pin(async move { Ok(out) })
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
