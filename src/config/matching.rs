//! Doctor matching configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Retrieval and ranking bounds for the doctor matching engine.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Page size for each directory query
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Default number of ranked doctors returned
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl MatchingConfig {
    /// Validate matching configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 {
            return Err(ValidationError::invalid_value(
                "matching.page_size",
                "must be at least 1",
            ));
        }
        if self.max_results == 0 {
            return Err(ValidationError::invalid_value(
                "matching.max_results",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_results: default_max_results(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

fn default_max_results() -> usize {
    5
}
