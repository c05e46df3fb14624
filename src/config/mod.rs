//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `MEDMATCH` prefix
//! and nested sections use `__` as the separator.
//!
//! # Example
//!
//! ```no_run
//! use medmatch::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod matching;
mod triage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use matching::MatchingConfig;
pub use triage::TriageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider and orchestration settings
    #[serde(default)]
    pub ai: AiConfig,

    /// Urgency thresholds and question limits
    #[serde(default)]
    pub triage: TriageConfig,

    /// Doctor retrieval and ranking bounds
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `MEDMATCH` prefix, e.g. `MEDMATCH__AI__TIMEOUT_SECS=10`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEDMATCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.triage.validate()?;
        self.matching.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_only_on_missing_api_key() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MEDMATCH__AI__API_KEY"))
        );
    }

    #[test]
    fn complete_config_validates() {
        let config = AppConfig {
            ai: AiConfig {
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
