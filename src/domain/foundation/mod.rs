//! Shared domain primitives (value objects and enums).

mod severity;
mod urgency;

pub use severity::Severity;
pub use urgency::UrgencyLevel;
