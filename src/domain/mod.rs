//! Domain layer containing the triage and matching business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (urgency, severity)
//! - `triage` - Symptom extraction, emergency detection, urgency classification
//! - `conversation` - Read-only conversation context passed in by the controller
//! - `questions` - Follow-up question generation and prioritization
//! - `matching` - Doctor scoring and ranking
//! - `response` - Post-processing of AI-generated text

pub mod conversation;
pub mod foundation;
pub mod matching;
pub mod questions;
pub mod response;
pub mod triage;
