//! Hint derivation for the display layer

/// Hint shown before the user has typed anything
pub const INITIAL_HINT: &str = "✨ Start typing to fill out the form...";

/// Informational marker prefixed to field-specific hints
pub const HINT_PREFIX: &str = "ℹ️ ";

/// Fixed message shown once all required fields are satisfied
pub const READY_MESSAGE: &str = "✅ Thanks, form is filled!";

/// Derive the display hint from a model response.
///
/// A `ready` flag unconditionally wins over any field-specific hint. A
/// non-blank hint is shown with the informational prefix; the hint content
/// itself is not trimmed. A blank or absent hint clears the display.
pub fn derive_hint(hint: Option<&str>, ready: bool) -> Option<String> {
    if ready {
        return Some(READY_MESSAGE.to_string());
    }

    match hint {
        Some(h) if !h.trim().is_empty() => Some(format!("{}{}", HINT_PREFIX, h)),
        _ => None,
    }
}
