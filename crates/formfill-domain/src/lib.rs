//! Formfill Domain Layer
//!
//! This crate contains the core data model for formfill: the structured
//! target record the system fills in, the partial patch the model returns,
//! the extraction response contract, and the trait boundary to hosted chat
//! providers.
//!
//! ## Key Concepts
//!
//! - **TargetRecord**: the structured form (name + address) being populated
//! - **RecordPatch**: a partial view of the record; present fields overwrite,
//!   absent fields leave existing values untouched
//! - **ExtractionResponse**: the `{ values, hint, ready }` contract expected
//!   from the model
//! - **Hint derivation**: the display string shown to the human, with a fixed
//!   completion message once all required fields are satisfied
//!
//! ## Architecture
//!
//! Infrastructure implementations (HTTP providers, the extraction pipeline,
//! the terminal front end) live in other crates and depend on this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extraction;
pub mod form;
pub mod hint;
pub mod traits;
pub mod ui;

// Re-exports for convenience
pub use extraction::ExtractionResponse;
pub use form::{AddressPatch, AddressRecord, NamePatch, NameRecord, RecordPatch, TargetRecord};
pub use hint::{derive_hint, HINT_PREFIX, INITIAL_HINT, READY_MESSAGE};
pub use traits::{ChatMessage, ChatProvider, ChatRequest, ChatRole};
pub use ui::UiState;
