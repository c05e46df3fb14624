//! Follow-up question generation and prioritization.

mod engine;
mod question;

pub use engine::QuestionEngine;
pub use question::{AnswerType, PrioritizedQuestion, QuestionCategory};
