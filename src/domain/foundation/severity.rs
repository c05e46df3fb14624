//! Symptom severity value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported severity of a single symptom.
///
/// `Unknown` means the patient's text gave no usable severity signal;
/// the question engine treats it as a gap worth asking about.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Unknown,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Buckets a 1-10 pain-scale value.
    pub fn from_scale(value: u8) -> Self {
        match value {
            0..=3 => Severity::Mild,
            4..=6 => Severity::Moderate,
            _ => Severity::Severe,
        }
    }

    /// Returns true if no severity was extracted.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Severity::Unknown)
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
