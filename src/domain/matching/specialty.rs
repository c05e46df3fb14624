//! Specialty mapping table.
//!
//! Translates the generic specialty tokens produced by triage (e.g.
//! "cardiology") into the specialization labels the doctor directory
//! actually indexes. Unmapped tokens are title-cased and used as-is, so a
//! new symptom specialty degrades to a plain text search instead of
//! failing.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The directory label used when no specialty is known at all.
pub const GENERAL_PRACTICE: &str = "General Practice";

/// Generic token -> directory specialization labels.
static SPECIALTY_MAP: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    map.insert("cardiology", &["Cardiology", "Cardiothoracic Surgery"]);
    map.insert("pulmonology", &["Pulmonology", "Respiratory Medicine"]);
    map.insert("neurology", &["Neurology", "Neurosurgery"]);
    map.insert("gastroenterology", &["Gastroenterology"]);
    map.insert("dermatology", &["Dermatology"]);
    map.insert("orthopedics", &["Orthopedics", "Sports Medicine"]);
    map.insert("rheumatology", &["Rheumatology"]);
    map.insert("ophthalmology", &["Ophthalmology"]);
    map.insert("otolaryngology", &["Otolaryngology (ENT)"]);
    map.insert("psychiatry", &["Psychiatry", "Psychology"]);
    map.insert("infectious disease", &["Infectious Disease"]);
    map.insert("emergency medicine", &["Emergency Medicine"]);
    map.insert("general practice", &[GENERAL_PRACTICE, "Family Medicine"]);
    map
});

/// Maps generic specialty tokens to directory labels, deduplicated,
/// preserving input order. An empty input defaults to General Practice.
pub fn map_specialties(tokens: &[String]) -> Vec<String> {
    if tokens.is_empty() {
        return vec![GENERAL_PRACTICE.to_string()];
    }

    let mut labels: Vec<String> = Vec::new();
    for token in tokens {
        let token_lower = token.trim().to_lowercase();
        match SPECIALTY_MAP.get(token_lower.as_str()) {
            Some(mapped) => {
                for label in *mapped {
                    if !labels.iter().any(|l| l == label) {
                        labels.push(label.to_string());
                    }
                }
            }
            None => {
                let label = title_case(&token_lower);
                if !label.is_empty() && !labels.iter().any(|l| *l == label) {
                    labels.push(label);
                }
            }
        }
    }

    if labels.is_empty() {
        labels.push(GENERAL_PRACTICE.to_string());
    }
    labels
}

/// Title-cases each word of an unmapped token.
fn title_case(token: &str) -> String {
    token
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
