//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and infrastructure.
//! Provider implementations live in other crates.

use async_trait::async_trait;
use serde::Serialize;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Fixed instructions to the assistant
    System,
    /// The task carrying the user's text
    User,
}

/// A single message in a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Message role
    pub role: ChatRole,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat-completion request to a hosted endpoint
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered messages (system instructions first)
    pub messages: Vec<ChatMessage>,

    /// Model identifier
    pub model: String,

    /// Ask the provider to constrain output to a JSON object
    pub json_output: bool,
}

/// Trait for hosted chat-completion providers
///
/// Implemented by the infrastructure layer (formfill-llm)
#[async_trait]
pub trait ChatProvider {
    /// Error type for provider operations
    type Error;

    /// Send a chat request and return the first choice's message content.
    ///
    /// `Ok(None)` means the provider answered but returned no choices or no
    /// content; transport and protocol failures are `Err`.
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>, Self::Error>;
}
