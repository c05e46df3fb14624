//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
///
/// Loaded once at startup and treated as immutable for the process lifetime.
/// Reinitialization builds a fresh orchestrator from a new config value;
/// in-flight requests keep the configuration they started with.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the primary provider
    pub api_key: Option<String>,

    /// API key for the fallback provider, if any
    pub fallback_api_key: Option<String>,

    /// Primary completion endpoint base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries against the primary provider after the first attempt
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Base backoff delay between retries, in milliseconds
    #[serde(default = "default_backoff")]
    pub backoff_base_ms: u64,

    /// Default maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    /// Get the per-attempt timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the base backoff delay as a Duration
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    /// Check if a primary API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("MEDMATCH__AI__API_KEY"));
        }
        if self.max_retries == 0 {
            return Err(ValidationError::invalid_value(
                "ai.max_retries",
                "must be at least 1",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::invalid_value(
                "ai.temperature",
                format!("{} is outside 0.0..=2.0", self.temperature),
            ));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            fallback_api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            backoff_base_ms: default_backoff(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_backoff() -> u64 {
    500
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}
