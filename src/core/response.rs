use serde::{Deserialize, Serialize};

/// What the engine hands back to the transport for every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotResponse {
    pub message: String,

    /// `true` only when the conversation ended (answer, cancel or fault)
    pub is_final: bool,
}

impl BotResponse {
    /// Intermediate prompt or validation hint
    pub fn prompt(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_final: false,
        }
    }

    /// Conversation-ending message
    pub fn last(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_final: true,
        }
    }
}
