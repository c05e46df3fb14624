//! Symptom extraction from free-text patient messages.
//!
//! Catalog-driven substring matching: for every symptom keyword present in
//! the normalized text, one `Symptom` is emitted with whatever severity,
//! duration, and location could be parsed from the same turn. Extraction
//! fails closed - text with no catalog hits yields an empty list, never an
//! error.

use tracing::debug;

use super::analysis::Symptom;
use super::catalog::{
    SymptomEntry, MILD_KEYWORDS, MODERATE_KEYWORDS, RELATIVE_DURATIONS, SEVERE_KEYWORDS,
    SYMPTOM_CATALOG,
};
use crate::domain::foundation::Severity;

/// Extracts structured symptoms from raw patient text.
///
/// Stateless and synchronous; safe to share across requests.
#[derive(Debug, Clone, Default)]
pub struct SymptomExtractor;

impl SymptomExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extracts one symptom per distinct catalog keyword found in `text`.
    pub fn extract(&self, text: &str) -> Vec<Symptom> {
        let normalized = normalize(text);

        let symptoms: Vec<Symptom> = SYMPTOM_CATALOG
            .iter()
            .filter(|entry| normalized.contains(entry.keyword))
            .map(|entry| self.build_symptom(entry, &normalized))
            .collect();

        debug!(count = symptoms.len(), "extracted symptoms");
        symptoms
    }

    fn build_symptom(&self, entry: &SymptomEntry, normalized: &str) -> Symptom {
        Symptom {
            text: entry.keyword.to_string(),
            severity: parse_severity(normalized),
            duration: parse_duration(normalized),
            location: parse_location(normalized, entry),
            urgency_score: entry.urgency_score,
        }
    }
}

/// Lowercases and collapses whitespace so catalog phrases match reliably.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses severity from vocabulary first, then a pain-scale mention.
pub fn parse_severity(text: &str) -> Severity {
    if SEVERE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Severity::Severe;
    }
    if MODERATE_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Severity::Moderate;
    }
    if MILD_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        return Severity::Mild;
    }
    if let Some(value) = parse_pain_scale(text) {
        return Severity::from_scale(value);
    }
    Severity::Unknown
}

/// Parses `"N/10"` or `"N out of 10"` pain-scale mentions.
pub fn parse_pain_scale(text: &str) -> Option<u8> {
    let words: Vec<&str> = text.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        // "7/10" possibly with trailing punctuation
        if let Some(prefix) = word.split("/10").next() {
            if word.contains("/10") {
                if let Ok(value) = prefix.parse::<u8>() {
                    if value <= 10 {
                        return Some(value);
                    }
                }
            }
        }
        // "7 out of 10"
        if words.get(i + 1) == Some(&"out")
            && words.get(i + 2) == Some(&"of")
            && words
                .get(i + 3)
                .is_some_and(|w| w.trim_matches(|c: char| !c.is_ascii_digit()) == "10")
        {
            if let Ok(value) = word.parse::<u8>() {
                if value <= 10 {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Parses `<number> <unit>` durations, else relative phrases.
///
/// Units are normalized for number: `"1 day"` never becomes `"1 days"`.
pub fn parse_duration(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        let Ok(value) = word.parse::<u32>() else {
            continue;
        };
        let Some(next) = words.get(i + 1) else {
            continue;
        };
        let unit_word = next.trim_matches(|c: char| !c.is_ascii_alphabetic());
        if let Some(unit) = normalize_unit(unit_word) {
            let suffix = if value == 1 { "" } else { "s" };
            return Some(format!("{} {}{}", value, unit, suffix));
        }
    }

    RELATIVE_DURATIONS
        .iter()
        .find(|phrase| text.contains(*phrase))
        .map(|phrase| phrase.to_string())
}

fn normalize_unit(word: &str) -> Option<&'static str> {
    match word {
        "hour" | "hours" | "hr" | "hrs" => Some("hour"),
        "day" | "days" => Some("day"),
        "week" | "weeks" | "wk" | "wks" => Some("week"),
        "month" | "months" => Some("month"),
        "year" | "years" => Some("year"),
        _ => None,
    }
}

/// Looks up the symptom's own location vocabulary in the text.
fn parse_location(text: &str, entry: &SymptomEntry) -> Option<String> {
    entry
        .locations
        .iter()
        .find(|loc| text.contains(*loc))
        .map(|loc| loc.to_string())
}

/// Returns true if the text mentions a body-location phrase for any
/// catalog symptom. Used by the question engine's answered-category filter.
pub fn mentions_any_location(text: &str) -> bool {
    SYMPTOM_CATALOG
        .iter()
        .flat_map(|entry| entry.locations.iter())
        .any(|loc| text.contains(loc))
}
