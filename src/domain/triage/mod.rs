//! Symptom triage: extraction, emergency detection, urgency classification.
//!
//! The three services here are pure functions of a single turn's text.
//! They never error on malformed input; unmatched text simply yields empty
//! results so the pipeline always produces a usable structure.

pub mod analysis;
pub mod catalog;
pub mod classifier;
pub mod emergency;
pub mod extractor;

pub use analysis::{Symptom, SymptomAnalysis};
pub use classifier::UrgencyClassifier;
pub use emergency::{EmergencyDetector, EmergencyFlag};
pub use extractor::SymptomExtractor;
