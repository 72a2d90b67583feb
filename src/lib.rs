// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod rank;
pub mod render;

// ---- Re-exports for stable public API ----
pub use crate::config::{load_config, Config, FeedSource, Secrets};
pub use crate::error::{ConfigError, CredentialError};
pub use crate::ingest::{fetch_papers, types::PaperRecord};
pub use crate::notify::{deliver, DeliveryMode};
pub use crate::pipeline::{run, run_to, run_with, RunContext};
pub use crate::rank::rank_papers;
pub use crate::render::render_digest;
