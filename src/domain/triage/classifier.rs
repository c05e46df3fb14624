//! Urgency classification.
//!
//! A pure function of the current turn's extraction results. Prior-turn
//! urgency is deliberately ignored; a later calm turn may legitimately
//! de-escalate, and escalation persistence belongs to the conversation
//! controller.

use tracing::debug;

use super::analysis::{Symptom, SymptomAnalysis};
use super::catalog::{COOCCURRENCE_RULES, SYMPTOM_CATALOG};
use super::emergency::EmergencyFlag;
use crate::config::TriageConfig;
use crate::domain::foundation::UrgencyLevel;

/// Classifies turn urgency from symptom scores and emergency flags.
#[derive(Debug, Clone)]
pub struct UrgencyClassifier {
    high_threshold: u8,
    medium_threshold: u8,
}

impl UrgencyClassifier {
    /// Creates a classifier with the configured thresholds.
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            high_threshold: config.high_threshold,
            medium_threshold: config.medium_threshold,
        }
    }

    /// Classifies a turn. Emergency flags dominate unconditionally.
    pub fn classify(&self, max_score: u8, has_emergency: bool) -> UrgencyLevel {
        if has_emergency {
            return UrgencyLevel::Emergency;
        }
        if max_score >= self.high_threshold {
            UrgencyLevel::High
        } else if max_score >= self.medium_threshold {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    /// Assembles the full analysis aggregate for one turn.
    pub fn analyze(
        &self,
        symptoms: Vec<Symptom>,
        emergency_flags: Vec<EmergencyFlag>,
    ) -> SymptomAnalysis {
        let urgency_score = symptoms.iter().map(|s| s.urgency_score).max().unwrap_or(0);
        let urgency_level = self.classify(urgency_score, !emergency_flags.is_empty());

        let analysis = SymptomAnalysis {
            possible_conditions: infer_conditions(&symptoms),
            recommended_specialties: recommend_specialties(&symptoms),
            symptoms,
            urgency_score,
            urgency_level,
            emergency_flags,
        };

        debug!(
            urgency = %analysis.urgency_level,
            score = analysis.urgency_score,
            "classified turn"
        );
        analysis
    }
}

impl Default for UrgencyClassifier {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}

/// Applies the co-occurrence rules to the extracted symptom set.
fn infer_conditions(symptoms: &[Symptom]) -> Vec<String> {
    let mut conditions = Vec::new();
    for rule in COOCCURRENCE_RULES {
        let has_first = symptoms.iter().any(|s| s.text == rule.first);
        let has_second = symptoms.iter().any(|s| s.text == rule.second);
        if has_first && has_second && !conditions.iter().any(|c| c == rule.condition) {
            conditions.push(rule.condition.to_string());
        }
    }
    conditions
}

/// Collects the specialties of every extracted symptom, deduplicated,
/// preserving first-seen order.
fn recommend_specialties(symptoms: &[Symptom]) -> Vec<String> {
    let mut specialties: Vec<String> = Vec::new();
    for symptom in symptoms {
        let Some(entry) = SYMPTOM_CATALOG.iter().find(|e| e.keyword == symptom.text) else {
            continue;
        };
        for specialty in entry.specialties {
            if !specialties.iter().any(|s| s == specialty) {
                specialties.push(specialty.to_string());
            }
        }
    }
    specialties
}
