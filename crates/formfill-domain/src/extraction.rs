//! Response contract expected from the model

use crate::form::RecordPatch;
use serde::Deserialize;

/// The decoded body of a model response.
///
/// The model is instructed to answer with a single JSON object shaped as
/// `{ values, hint, ready }`. Every key is optional; unrecognized keys are
/// ignored. Decoding into this type (rather than working on untyped JSON)
/// keeps the merge step honest about what the contract actually is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResponse {
    /// Extracted form fields, merged into the target record
    #[serde(default)]
    pub values: RecordPatch,

    /// One-sentence instructional hint for fields still missing
    pub hint: Option<String>,

    /// True when the model judges all required fields satisfied
    pub ready: Option<bool>,
}
