//! Application layer - the exposed triage operations.

mod engine;

pub use engine::{PromptContext, TriageEngine};
