use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    fn chars(&self) -> usize {
        self.content.chars().count()
    }
}

/// Conversation with the assistant, bounded by the total number of
/// characters of its messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    char_limit: usize,
}

impl Transcript {
    pub fn new(char_limit: usize) -> Self {
        Self {
            messages: Vec::new(),
            char_limit,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn total_chars(&self) -> usize {
        self.messages.iter().map(ChatMessage::chars).sum()
    }

    /// Appends `message` and drops the oldest messages until the transcript
    /// fits the limit again. The newest message is always kept.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        let mut total = self.total_chars();
        let mut dropped = 0;
        while total > self.char_limit && dropped + 1 < self.messages.len() {
            total -= self.messages[dropped].chars();
            dropped += 1;
        }
        self.messages.drain(..dropped);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
