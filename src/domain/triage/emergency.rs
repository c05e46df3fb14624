//! Emergency pattern detection.
//!
//! Scans normalized text against the fixed emergency catalog. Detection is
//! independent of symptom urgency scoring and always dominates it: one flag
//! is enough to classify the whole turn as an emergency.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::{EmergencyEntry, EMERGENCY_CATALOG};
use super::extractor::normalize;

/// A matched emergency pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyFlag {
    /// The phrase that triggered the match.
    pub matched_phrase: String,
    /// Human-readable description of the suspected emergency.
    pub description: String,
    /// What the patient should do right now.
    pub immediate_action: String,
}

impl EmergencyFlag {
    fn from_entry(entry: &EmergencyEntry, phrase: &str) -> Self {
        Self {
            matched_phrase: phrase.to_string(),
            description: entry.description.to_string(),
            immediate_action: entry.immediate_action.to_string(),
        }
    }
}

/// Detects emergency phrases in patient text.
///
/// Stateless and synchronous; safe to share across requests.
#[derive(Debug, Clone, Default)]
pub struct EmergencyDetector;

impl EmergencyDetector {
    /// Creates a new detector.
    pub fn new() -> Self {
        Self
    }

    /// Returns all matched emergency flags, in catalog order.
    ///
    /// Within one catalog entry the first matching phrase wins, so a single
    /// entry is never reported twice no matter how many of its phrases the
    /// text contains. Distinct entries may all match and are all reported.
    pub fn detect(&self, text: &str) -> Vec<EmergencyFlag> {
        let normalized = normalize(text);

        let flags: Vec<EmergencyFlag> = EMERGENCY_CATALOG
            .iter()
            .filter_map(|entry| {
                entry
                    .phrases
                    .iter()
                    .find(|phrase| normalized.contains(*phrase))
                    .map(|phrase| EmergencyFlag::from_entry(entry, phrase))
            })
            .collect();

        if !flags.is_empty() {
            warn!(count = flags.len(), "emergency patterns detected");
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_produces_no_flags() {
        let detector = EmergencyDetector::new();
        assert!(detector.detect("mild headache since yesterday").is_empty());
        assert!(detector.detect("").is_empty());
    }

    #[test]
    fn single_phrase_matches_once() {
        let detector = EmergencyDetector::new();
        let flags = detector.detect("I have crushing chest pain right now");

        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].matched_phrase, "crushing chest pain");
        assert!(flags[0].description.contains("heart attack"));
        assert!(!flags[0].immediate_action.is_empty());
    }

    #[test]
    fn multiple_phrases_of_one_entry_count_once() {
        let detector = EmergencyDetector::new();
        // Both phrases belong to the breathing entry
        let flags = detector.detect("I can't breathe and I'm gasping for air");
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].matched_phrase, "can't breathe");
    }

    #[test]
    fn distinct_entries_all_reported_in_catalog_order() {
        let detector = EmergencyDetector::new();
        let flags =
            detector.detect("slurred speech and now I'm coughing up blood");

        assert_eq!(flags.len(), 2);
        assert!(flags[0].description.contains("stroke"));
        assert!(flags[1].description.contains("bleeding"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let detector = EmergencyDetector::new();
        let flags = detector.detect("SEVERE ALLERGIC REACTION to peanuts");
        assert_eq!(flags.len(), 1);
        assert!(flags[0].description.contains("anaphylaxis"));
    }
}
