//! Credential handling for hosted providers
//!
//! The API key is supplied by the user at runtime, held only in memory, and
//! replaced wholesale on resubmission. Nothing here touches the network;
//! provider construction is purely local object setup.

use thiserror::Error;

/// Errors raised when binding a provider to user credentials
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No key, or a blank key, was supplied
    #[error("No API key provided")]
    Missing,

    /// The HTTP client could not be constructed
    #[error("Failed to construct client: {0}")]
    Construction(String),
}
