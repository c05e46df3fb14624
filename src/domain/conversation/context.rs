//! Read-only conversation context.
//!
//! Owned and persisted by the conversation controller; the core reads it
//! per call and returns deltas for the controller to apply. Nothing in this
//! crate mutates a context it was handed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::foundation::UrgencyLevel;

/// Stage of the triage conversation.
///
/// Stages flow forward in the usual case but the controller may loop back:
/// `Initial` → `Gathering` → `Analysis` → `Recommendation` → `Booking`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// First contact; broad open questions.
    #[default]
    Initial,
    /// Actively collecting symptom details.
    Gathering,
    /// Enough gathered; structured analysis in progress.
    Analysis,
    /// Presenting doctors and care advice.
    Recommendation,
    /// Appointment handoff (controller territory).
    Booking,
}

impl ConversationStage {
    /// Returns true while clarifying questions are still the priority.
    pub fn is_gathering(&self) -> bool {
        matches!(self, ConversationStage::Initial | ConversationStage::Gathering)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a user message stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates an assistant message stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Read-only view of the conversation state for one core call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Controller-owned session identity.
    pub session_id: Uuid,
    /// Ordered message history, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Symptom keywords the controller has accumulated so far.
    pub symptom_keywords: Vec<String>,
    /// Urgency level as of the latest analysis.
    pub urgency_level: UrgencyLevel,
    /// Current conversation stage.
    pub stage: ConversationStage,
    /// Specialty the controller has settled on, if any.
    pub recommended_specialty: Option<String>,
    /// Free-form user location, if shared.
    pub user_location: Option<String>,
    /// Controller-defined metadata.
    pub metadata: HashMap<String, String>,
}

impl ConversationContext {
    /// Creates an empty context for a new session.
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
            symptom_keywords: Vec::new(),
            urgency_level: UrgencyLevel::default(),
            stage: ConversationStage::default(),
            recommended_specialty: None,
            user_location: None,
            metadata: HashMap::new(),
        }
    }

    /// Appends a message (builder style, used by tests and the controller).
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets the stage.
    pub fn with_stage(mut self, stage: ConversationStage) -> Self {
        self.stage = stage;
        self
    }

    /// Sets the urgency level.
    pub fn with_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency_level = urgency;
        self
    }

    /// Sets the user location.
    pub fn with_user_location(mut self, location: impl Into<String>) -> Self {
        self.user_location = Some(location.into());
        self
    }

    /// Returns the last `n` messages, oldest first.
    pub fn recent_messages(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// All user-authored text, lowercased and joined.
    ///
    /// Used by the question engine to detect already-answered categories.
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of user turns so far.
    pub fn user_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == ChatRole::User).count()
    }
}
