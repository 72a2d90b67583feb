// src/config/mod.rs
pub mod digest;
pub mod secrets;

pub use digest::{load_config, Config, FeedSource, DEFAULT_CONFIG_PATH};
pub use secrets::{MailCredentials, Secrets};
