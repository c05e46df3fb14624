//! Symptom and analysis aggregate types.

use serde::{Deserialize, Serialize};

use super::emergency::EmergencyFlag;
use crate::domain::foundation::{Severity, UrgencyLevel};

/// One structured symptom extracted from a single turn of text.
///
/// Immutable once extracted. One symptom is produced per distinct catalog
/// keyword hit per turn; merging duplicates across turns is the
/// conversation controller's concern, not this layer's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    /// The catalog keyword that matched.
    pub text: String,
    /// Extracted severity, `Unknown` when the text gave no signal.
    pub severity: Severity,
    /// Normalized duration such as `"3 days"`, `None` when absent.
    pub duration: Option<String>,
    /// Body location phrase, `None` when unspecified.
    pub location: Option<String>,
    /// Base urgency score from the catalog, 1-10.
    pub urgency_score: u8,
}

impl Symptom {
    /// Returns true if the duration suggests a chronic complaint.
    pub fn is_chronic(&self) -> bool {
        self.duration.as_deref().is_some_and(|d| {
            super::catalog::CHRONIC_MARKERS
                .iter()
                .any(|marker| d.contains(marker))
        })
    }

    /// Returns true if this symptom usually has a meaningful body location.
    pub fn is_localizable(&self) -> bool {
        super::catalog::LOCALIZABLE_KEYWORDS
            .iter()
            .any(|kw| self.text.contains(kw))
    }

    /// Returns true if this is a pain-type symptom.
    pub fn is_pain(&self) -> bool {
        self.text.contains("pain") || self.text.contains("ache")
    }
}

/// Aggregate result of analyzing one turn of patient text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomAnalysis {
    /// All symptoms extracted this turn.
    pub symptoms: Vec<Symptom>,
    /// Maximum member urgency score, 0 when no symptoms matched.
    pub urgency_score: u8,
    /// Classified urgency for the turn.
    pub urgency_level: UrgencyLevel,
    /// Conditions suggested by symptom co-occurrence rules.
    pub possible_conditions: Vec<String>,
    /// Deduplicated specialty tokens suggested by the symptoms.
    pub recommended_specialties: Vec<String>,
    /// Matched emergency patterns, in catalog order.
    pub emergency_flags: Vec<EmergencyFlag>,
}

impl SymptomAnalysis {
    /// Returns true if any emergency pattern matched.
    pub fn is_emergency(&self) -> bool {
        !self.emergency_flags.is_empty()
    }

    /// Returns the symptom keyword set for context tracking.
    pub fn symptom_keywords(&self) -> Vec<String> {
        self.symptoms.iter().map(|s| s.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptom(text: &str, duration: Option<&str>) -> Symptom {
        Symptom {
            text: text.to_string(),
            severity: Severity::Unknown,
            duration: duration.map(String::from),
            location: None,
            urgency_score: 5,
        }
    }

    #[test]
    fn chronic_detection_uses_duration_markers() {
        assert!(symptom("back pain", Some("3 weeks")).is_chronic());
        assert!(symptom("back pain", Some("2 months")).is_chronic());
        assert!(!symptom("back pain", Some("2 days")).is_chronic());
        assert!(!symptom("back pain", None).is_chronic());
    }

    #[test]
    fn pain_and_localizable_classification() {
        let s = symptom("chest pain", None);
        assert!(s.is_pain());
        assert!(s.is_localizable());

        let cough = symptom("cough", None);
        assert!(!cough.is_pain());
        assert!(!cough.is_localizable());
    }

    #[test]
    fn default_analysis_is_empty_and_low() {
        let analysis = SymptomAnalysis::default();
        assert!(analysis.symptoms.is_empty());
        assert_eq!(analysis.urgency_level, UrgencyLevel::Low);
        assert!(!analysis.is_emergency());
    }
}
