//! OpenAI-compatible chat-completion provider
//!
//! Sends one chat-completions request per extraction cycle with bearer
//! authentication and, when asked, a JSON-object response-format constraint.
//! Failures are not retried; the extraction layer decides what a failure
//! means for the user.

use crate::credentials::CredentialError;
use crate::LlmError;
use async_trait::async_trait;
use formfill_domain::traits::{ChatMessage, ChatProvider, ChatRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default timeout for provider requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hosted chat-completion provider bound to a user-supplied API key.
///
/// Construction is local only; the key is first used on the wire when a
/// request is sent.
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response body from the chat-completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Bind a provider to an API key.
    ///
    /// # Errors
    ///
    /// - `CredentialError::Missing` if the key is empty or all-whitespace
    /// - `CredentialError::Construction` if the HTTP client cannot be built
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, CredentialError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CredentialError::Missing);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| CredentialError::Construction(e.to_string()))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            client,
        })
    }

    /// Override the API endpoint (used by tests and compatible gateways).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint this provider talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    type Error = LlmError;

    async fn complete(&self, request: ChatRequest) -> Result<Option<String>, Self::Error> {
        let url = format!("{}/chat/completions", self.endpoint);

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            response_format: request
                .json_output
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        debug!(
            "POST {} (model {}, {} messages)",
            url,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
