// src/config/digest.rs
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// One named feed the digest pulls candidates from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The run configuration.
///
/// Loading only checks that the document parses. Keys are looked up when a
/// component needs them, so a document without `max_papers` still loads and
/// fails later with [`ConfigError::MissingKey`] when ranking starts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub email: Option<String>,
    pub feeds: Option<Vec<FeedSource>>,
    pub research_interests: Option<String>,
    pub max_papers: Option<u32>,
    /// Raw delivery mode; interpreted by `notify`. Absent means "print".
    pub email_method: Option<String>,
}

impl Config {
    pub fn email(&self) -> Result<&str, ConfigError> {
        self.email.as_deref().ok_or(ConfigError::MissingKey("email"))
    }

    pub fn feeds(&self) -> Result<&[FeedSource], ConfigError> {
        self.feeds.as_deref().ok_or(ConfigError::MissingKey("feeds"))
    }

    pub fn research_interests(&self) -> Result<&str, ConfigError> {
        self.research_interests
            .as_deref()
            .ok_or(ConfigError::MissingKey("research_interests"))
    }

    pub fn max_papers(&self) -> Result<u32, ConfigError> {
        self.max_papers.ok_or(ConfigError::MissingKey("max_papers"))
    }
}

/// Load the configuration from `path`. YAML, TOML or JSON, chosen by extension;
/// unknown extensions are read as YAML.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let malformed = |reason: String| ConfigError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let cfg = parse_config(&content, &ext).map_err(malformed)?;
    tracing::debug!(
        path = %path.display(),
        feeds = cfg.feeds.as_ref().map(Vec::len).unwrap_or(0),
        "config loaded"
    );
    Ok(cfg)
}

fn parse_config(s: &str, ext: &str) -> Result<Config, String> {
    match ext {
        "toml" => toml::from_str(s).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(s).map_err(|e| e.to_string()),
        _ => {
            // An empty YAML document is `null`, which is not a mapping.
            let cfg: Option<Config> = serde_yaml::from_str(s).map_err(|e| e.to_string())?;
            cfg.ok_or_else(|| "document is empty".to_string())
        }
    }
}
