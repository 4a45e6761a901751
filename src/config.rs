/*!
 * Pipeline configuration.
 *
 * This module holds the settings that bound pipeline behavior: input
 * limits, the batch cap, stage timeouts and provider connection details.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the translation quality pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineSettings {
    /// Maximum source text length in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum number of jobs accepted in a single batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Per-stage timeout in seconds
    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,

    /// Generation provider connection settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_batch_size: default_max_batch_size(),
            stage_timeout_secs: default_stage_timeout_secs(),
            provider: ProviderSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl PipelineSettings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_text_length == 0 {
            return Err(anyhow!("max_text_length must be greater than zero"));
        }
        if self.max_batch_size == 0 {
            return Err(anyhow!("max_batch_size must be greater than zero"));
        }
        if self.stage_timeout_secs == 0 {
            return Err(anyhow!("stage_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Per-stage timeout as a `Duration`
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }
}

/// Generation provider connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate's level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_text_length() -> usize {
    10_000
}

fn default_max_batch_size() -> usize {
    10
}

fn default_stage_timeout_secs() -> u64 {
    120
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
