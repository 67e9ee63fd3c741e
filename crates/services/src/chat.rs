//! Chat widget collaborator.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_ECHO_DELAY: Duration = Duration::from_millis(500);

const ECHO_NOTE: &str = "(This reply is a placeholder until a real assistant is connected.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("chat backend unavailable: {0}")]
    Unavailable(String),
}

/// Produces the assistant reply to a conversation.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// # Errors
    ///
    /// Returns `ChatError` when no reply can be produced.
    async fn send(&self, history: &[ChatMessage]) -> Result<ChatMessage, ChatError>;
}

/// Replies by quoting the last message back after a short delay.
#[derive(Debug, Clone)]
pub struct EchoChatClient {
    delay: Duration,
}

impl EchoChatClient {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for EchoChatClient {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_DELAY)
    }
}

#[async_trait]
impl ChatClient for EchoChatClient {
    async fn send(&self, history: &[ChatMessage]) -> Result<ChatMessage, ChatError> {
        let last = history.last().map_or("", |m| m.content.as_str());
        let reply = format!("You said: \"{last}\"\n\n{ECHO_NOTE}");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(ChatMessage::assistant(reply))
    }
}
