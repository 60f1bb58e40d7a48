use serde::{Deserialize, Serialize};

use ts_core::{Character, CoreResult};

/// Who a message is from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the whole conversation.
    System,
    /// The player, or context supplied on the player's behalf.
    User,
    /// The chat service.
    Assistant,
}

/// One role-tagged message, exactly as it is sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author of the message.
    pub role: Role,
    /// Plain text content. Never carries terminal styling.
    pub content: String,
}

impl ChatMessage {
    /// Create a message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// A user message carrying the character sheet as compact JSON.
    pub fn character_context(character: &Character) -> CoreResult<Self> {
        Ok(Self::user(format!(
            "Character: {}",
            character.to_compact_json()?
        )))
    }
}

/// Whether an outgoing turn refers to the player's character.
pub fn mentions_character(text: &str) -> bool {
    text.to_lowercase().contains("character")
}
