//! The extraction client
//!
//! One call per settled text change: precondition checks, prompt
//! construction, a single provider round-trip under a timeout. The raw
//! response text is returned unparsed; applying it is the applier's job.

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::prompt::build_messages;
use formfill_domain::traits::{ChatProvider, ChatRequest};
use tokio::time::timeout;
use tracing::debug;

/// Builds and sends extraction requests to a chat provider.
pub struct FormExtractor {
    config: ExtractorConfig,
}

impl FormExtractor {
    /// Create a new extractor.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run one extraction call against the given provider.
    ///
    /// The provider is injected per call; `None` means no credential-bound
    /// client exists yet and fails fast with [`ExtractionError::NoClient`].
    /// Empty or all-whitespace text is skipped silently (`Ok(None)`, no
    /// request sent). On success the first choice's content is returned
    /// unparsed.
    pub async fn extract<P>(
        &self,
        provider: Option<&P>,
        text: &str,
    ) -> Result<Option<String>, ExtractionError>
    where
        P: ChatProvider + Sync,
        P::Error: std::fmt::Display,
    {
        let provider = provider.ok_or(ExtractionError::NoClient)?;

        if text.trim().is_empty() {
            debug!("Skipping extraction for blank source text");
            return Ok(None);
        }

        let request = ChatRequest {
            messages: build_messages(text),
            model: self.config.model.clone(),
            json_output: true,
        };

        debug!("Requesting extraction ({} chars of source text)", text.len());

        let content = timeout(self.config.request_timeout(), provider.complete(request))
            .await
            .map_err(|_| ExtractionError::Timeout)?
            .map_err(|e| ExtractionError::Transport(e.to_string()))?;

        match content {
            Some(raw) => {
                debug!("Provider returned {} chars", raw.len());
                Ok(Some(raw))
            }
            None => Err(ExtractionError::EmptyResponse),
        }
    }
}
