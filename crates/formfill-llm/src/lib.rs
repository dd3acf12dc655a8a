//! Formfill Provider Layer
//!
//! Implementations of the `ChatProvider` trait from `formfill-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing; records every request
//! - `OpenAiProvider`: hosted chat-completion API, bound to a user-supplied
//!   API key
//!
//! # Examples
//!
//! ```
//! use formfill_llm::MockProvider;
//! use formfill_domain::traits::{ChatMessage, ChatProvider, ChatRequest};
//!
//! # async fn example() {
//! let provider = MockProvider::new(r#"{"values": {}, "ready": false}"#);
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::user("test")],
//!     model: "test-model".to_string(),
//!     json_output: true,
//! };
//! let content = provider.complete(request).await.unwrap();
//! assert!(content.unwrap().contains("ready"));
//! # }
//! ```

#![warn(missing_docs)]

pub mod credentials;
pub mod openai;

use async_trait::async_trait;
use formfill_domain::traits::{ChatProvider, ChatRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use credentials::CredentialError;
pub use openai::OpenAiProvider;

/// Errors that can occur during provider operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// What the mock should do for one call
#[derive(Debug, Clone)]
enum MockReply {
    /// Return this content (None models a choice without content)
    Content(Option<String>),
    /// Fail with a communication error
    Error(String),
}

/// Mock provider for deterministic testing
///
/// Returns queued replies in order, falling back to a fixed default, and
/// records every request it receives so tests can assert on what was (or was
/// not) sent.
///
/// # Examples
///
/// ```
/// use formfill_llm::MockProvider;
///
/// let provider = MockProvider::new("default");
/// provider.push_response("first");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    queued: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockProvider {
    /// Create a mock that answers every request with a fixed content string.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Content(Some(response.into())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that answers with no content (no choices returned).
    pub fn empty() -> Self {
        Self {
            default_reply: MockReply::Content(None),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that fails every request with a communication error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Error(message.into()),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a content reply for the next unanswered call.
    pub fn push_response(&self, response: impl Into<String>) {
        self.queued
            .lock()
            .unwrap()
            .push_back(MockReply::Content(Some(response.into())));
    }

    /// Queue a no-content reply for the next unanswered call.
    pub fn push_empty(&self) {
        self.queued.lock().unwrap().push_back(MockReply::Content(None));
    }

    /// Queue an error reply for the next unanswered call.
    pub fn push_error(&self, message: impl Into<String>) {
        self.queued
            .lock()
            .unwrap()
            .push_back(MockReply::Error(message.into()));
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: ChatRequest) -> Result<Option<String>, Self::Error> {
        self.requests.lock().unwrap().push(request);

        let reply = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Content(content) => Ok(content),
            MockReply::Error(message) => Err(LlmError::Communication(message)),
        }
    }
}
