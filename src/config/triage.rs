//! Triage threshold configuration
//!
//! The urgency cutoffs come from the clinical keyword catalog's 1-10 scoring
//! scale. They are configurable so alternate catalogs (e.g. test fixtures)
//! can shift the bands without touching classification logic.

use serde::Deserialize;

use super::error::ValidationError;

/// Thresholds applied to the maximum symptom urgency score of a turn.
#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// Scores at or above this are classified High
    #[serde(default = "default_high")]
    pub high_threshold: u8,

    /// Scores at or above this (but below high) are classified Medium
    #[serde(default = "default_medium")]
    pub medium_threshold: u8,

    /// Symptoms scoring at or above this get emergency-differentiator questions
    #[serde(default = "default_emergency_question")]
    pub emergency_question_threshold: u8,

    /// Default number of follow-up questions returned per turn
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
}

impl TriageConfig {
    /// Validate threshold ordering
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.medium_threshold >= self.high_threshold {
            return Err(ValidationError::invalid_value(
                "triage.medium_threshold",
                format!(
                    "medium threshold {} must be below high threshold {}",
                    self.medium_threshold, self.high_threshold
                ),
            ));
        }
        if self.high_threshold > 10 {
            return Err(ValidationError::invalid_value(
                "triage.high_threshold",
                "urgency scores range 1-10",
            ));
        }
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high(),
            medium_threshold: default_medium(),
            emergency_question_threshold: default_emergency_question(),
            max_questions: default_max_questions(),
        }
    }
}

fn default_high() -> u8 {
    8
}

fn default_medium() -> u8 {
    5
}

fn default_emergency_question() -> u8 {
    7
}

fn default_max_questions() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_scale() {
        let config = TriageConfig::default();
        assert_eq!(config.high_threshold, 8);
        assert_eq!(config.medium_threshold, 5);
        assert_eq!(config.emergency_question_threshold, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = TriageConfig {
            high_threshold: 4,
            medium_threshold: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_threshold_above_scale() {
        let config = TriageConfig {
            high_threshold: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
