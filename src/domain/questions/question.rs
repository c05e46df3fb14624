//! Prioritized question value objects.

use serde::{Deserialize, Serialize};

/// What kind of information a question is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Duration,
    Severity,
    Location,
    Progression,
    Triggers,
    Associated,
    Emergency,
}

/// The answer format the UI should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    /// 1-10 scale picker.
    Scale,
    /// Time span input.
    Duration,
    /// Body location input.
    Location,
    /// Yes/no toggle.
    YesNo,
    /// Free text.
    Description,
}

/// One clarifying question, ready to rank.
///
/// Base priorities sit in 0-10; contextual boosts may push the effective
/// priority past 10. Only the ordering matters, so no upper clamp is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedQuestion {
    /// The question to put to the patient.
    pub question: String,
    /// Effective priority after boosts; higher asks sooner.
    pub priority: i32,
    /// Information category the question targets.
    pub category: QuestionCategory,
    /// Why this question was generated (for audit and debugging).
    pub reasoning: String,
    /// Expected answer format.
    pub expected_answer_type: AnswerType,
}

impl PrioritizedQuestion {
    /// Creates a question with the given base priority.
    pub fn new(
        question: impl Into<String>,
        priority: i32,
        category: QuestionCategory,
        reasoning: impl Into<String>,
        expected_answer_type: AnswerType,
    ) -> Self {
        Self {
            question: question.into(),
            priority,
            category,
            reasoning: reasoning.into(),
            expected_answer_type,
        }
    }

    /// Normalized text used for in-call deduplication.
    pub fn normalized_text(&self) -> String {
        self.question.trim().to_lowercase()
    }
}
