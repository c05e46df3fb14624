//! Conversation context passed into the core by the conversation controller.

mod context;

pub use context::{ChatMessage, ChatRole, ConversationContext, ConversationStage};
