//! Display state derived after each extraction cycle

use crate::hint::INITIAL_HINT;

/// State the view renders alongside the forms.
///
/// Recomputed after each extraction cycle; `loading` is true only while a
/// cycle is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Current display hint, if any
    pub hint: Option<String>,

    /// True while an extraction cycle is in flight
    pub loading: bool,
}

impl UiState {
    /// Initial state, showing the start-typing hint.
    pub fn initial() -> Self {
        Self {
            hint: Some(INITIAL_HINT.to_string()),
            loading: false,
        }
    }
}
