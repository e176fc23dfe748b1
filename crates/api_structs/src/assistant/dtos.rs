use serde::{Deserialize, Serialize};
use timemesh_domain::{ChatMessage, ChatRole};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChatMessageDTO {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessageDTO {
    pub fn new(message: ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
        }
    }

    pub fn into_domain(self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
        }
    }
}
