//! `DebugBard` configuration
//!
//! Values come from code, from a YAML document, or from `TROUPE_*` environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chunk::DEFAULT_MAX_CHUNK_LEN;
use crate::priority::Priority;

/// Longest tag legacy Android log buffers accept
pub const LEGACY_MAX_TAG_LEN: usize = 23;

/// Tag used when no explicit tag is set and none can be derived from the caller
pub const DEFAULT_FALLBACK_TAG: &str = "Troupe";

pub const ENV_MAX_CHUNK_LEN: &str = "TROUPE_MAX_CHUNK_LEN";
pub const ENV_MAX_TAG_LEN: &str = "TROUPE_MAX_TAG_LEN";
pub const ENV_LOG_LEVEL: &str = "TROUPE_LOG_LEVEL";
pub const ENV_FALLBACK_TAG: &str = "TROUPE_FALLBACK_TAG";

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a [`DebugBard`](super::DebugBard)
///
/// ```
/// use troupe_core::{DebugBardConfig, Priority};
///
/// let config = DebugBardConfig::from_yaml_str("max_tag_len: 23\nmin_priority: warn\n").unwrap();
/// assert_eq!(config.max_chunk_len, 4000);
/// assert_eq!(config.max_tag_len, Some(23));
/// assert_eq!(config.min_priority, Priority::WARN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugBardConfig {
    /// Longest piece written to the sink in one call, in characters
    pub max_chunk_len: usize,
    /// Truncate caller-derived and fallback tags to this many characters. Explicit tags are
    /// never truncated.
    pub max_tag_len: Option<usize>,
    /// Calls below this priority are dropped
    pub min_priority: Priority,
    /// Tag used when the caller cannot be determined
    pub fallback_tag: String,
}

impl Default for DebugBardConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            max_tag_len: None,
            min_priority: Priority::VERBOSE,
            fallback_tag: DEFAULT_FALLBACK_TAG.to_string(),
        }
    }
}

impl DebugBardConfig {
    /// Defaults with the legacy 23-character tag limit
    pub fn legacy() -> Self {
        Self {
            max_tag_len: Some(LEGACY_MAX_TAG_LEN),
            ..Self::default()
        }
    }

    /// Read overrides from the `TROUPE_*` environment variables.
    ///
    /// Unset or malformed variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(len) = lookup(ENV_MAX_CHUNK_LEN).and_then(|v| v.trim().parse::<usize>().ok()) {
            if len > 0 {
                config.max_chunk_len = len;
            }
        }

        if let Some(value) = lookup(ENV_MAX_TAG_LEN) {
            let value = value.trim().to_lowercase();
            if value == "legacy" {
                config.max_tag_len = Some(LEGACY_MAX_TAG_LEN);
            } else if let Ok(len) = value.parse::<usize>() {
                // 0 means "no limit"
                config.max_tag_len = (len > 0).then_some(len);
            }
        }

        if let Some(priority) = lookup(ENV_LOG_LEVEL).and_then(|v| v.parse::<Priority>().ok()) {
            config.min_priority = priority;
        }

        if let Some(tag) = lookup(ENV_FALLBACK_TAG).filter(|t| !t.trim().is_empty()) {
            config.fallback_tag = tag.trim().to_string();
        }

        config
    }

    /// Parse a YAML document; missing fields keep their default
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file; a missing file yields the defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject values that would make the bard unusable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_chunk_len == 0 {
            return Err(ConfigError::Invalid("max_chunk_len must be positive".to_string()));
        }
        if self.max_tag_len == Some(0) {
            return Err(ConfigError::Invalid("max_tag_len must be positive".to_string()));
        }
        Ok(())
    }
}
