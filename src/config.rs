//! LLM connection configuration
//!
//! Reads the `{model, api_key, base_url}` triple from a YAML document.
//! Loading fails closed: any problem is logged and the caller gets `None`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "causal_config.yml";

const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Connection parameters for an OpenAI-compatible chat completions API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    /// Upper bound on a single remote call
    pub timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot load {}: file does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error in configuration file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("configuration file is missing field {0}")]
    MissingField(&'static str),
}

/// Raw document shape. Every field is optional so that a missing field
/// is reported by name instead of as a generic parse error.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl LlmConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a YAML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        // An empty document is null, not a mapping
        let raw = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str::<Option<RawConfig>>(content)?.unwrap_or_default()
        };

        Ok(Self {
            model: required("model", raw.model)?,
            api_key: required("api_key", raw.api_key)?,
            base_url: required("base_url", raw.base_url)?,
            timeout: Duration::from_secs(raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// Load a config file, logging and swallowing any error.
    pub fn load_or_none(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    model = %config.model,
                    base_url = %config.base_url,
                    api_key = "***",
                    timeout_secs = config.timeout.as_secs(),
                    "Loaded LLM configuration"
                );
                Some(config)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load LLM configuration");
                None
            }
        }
    }
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(name)),
    }
}
