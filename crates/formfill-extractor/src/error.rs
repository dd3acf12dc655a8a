//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors that can occur during an extraction call
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No credential-bound client has been installed
    #[error("No API client configured")]
    NoClient,

    /// The provider answered with no choices or no content
    #[error("Provider returned no content")]
    EmptyResponse,

    /// The provider call exceeded the request timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Transport or provider failure; never retried automatically
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors that can occur while applying a model response
#[derive(Error, Debug)]
pub enum ApplyError {
    /// Response body was not parseable as the expected JSON contract
    #[error("Malformed response: {0}")]
    Malformed(String),
}
