//! Urgency level value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How quickly a patient should seek care.
///
/// Levels are strictly ordered: `Low < Medium < High < Emergency`.
/// Emergency is reserved for turns where the emergency-pattern catalog
/// matched; it is never produced by symptom scoring alone.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Emergency => "Emergency",
        }
    }

    /// Returns care-seeking advice for this level.
    pub fn advice(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => {
                "Schedule a routine appointment at your convenience."
            }
            UrgencyLevel::Medium => {
                "Book an appointment within the next few days."
            }
            UrgencyLevel::High => {
                "Seek medical attention today or as soon as possible."
            }
            UrgencyLevel::Emergency => {
                "Call emergency services or go to the nearest emergency room now."
            }
        }
    }

    /// Returns true if this level warrants same-day care.
    pub fn is_acute(&self) -> bool {
        matches!(self, UrgencyLevel::High | UrgencyLevel::Emergency)
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
