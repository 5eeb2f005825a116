//! Conversation messages for schema definition

use crate::NewVariable;
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person defining the schema
    User,
    /// The schema assistant
    Assistant,
}

/// One message in the schema conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote it
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Variables proposed by the assistant
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<NewVariable>,
}

impl ChatMessage {
    /// A message typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            suggestions: Vec::new(),
        }
    }

    /// A reply from the assistant
    pub fn assistant(reply: AssistantReply) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: reply.message,
            suggestions: reply.suggestions,
        }
    }
}

/// What a schema assistant answers to a user message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssistantReply {
    /// Reply text
    pub message: String,
    /// Proposed variables
    pub suggestions: Vec<NewVariable>,
}
