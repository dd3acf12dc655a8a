//! Apply a model response to the target record and display state

use crate::error::ApplyError;
use formfill_domain::{derive_hint, ExtractionResponse, TargetRecord, UiState};
use tracing::{debug, warn};

/// Parse a raw response body and merge it into the record and display state.
///
/// On parse failure the record and hint are left untouched and
/// [`ApplyError::Malformed`] is returned; this degrades silently at the user
/// level (diagnostic log only, no notice). On success, present fields in
/// `values` overwrite (including with empty strings), the hint is rederived,
/// and a `ready` flag wins over any field-specific hint.
pub fn apply_response(
    raw: &str,
    record: &mut TargetRecord,
    ui: &mut UiState,
) -> Result<(), ApplyError> {
    let response: ExtractionResponse = serde_json::from_str(raw).map_err(|e| {
        warn!("Failed to parse extraction response: {}", e);
        ApplyError::Malformed(e.to_string())
    })?;

    record.apply_patch(&response.values);
    ui.hint = derive_hint(response.hint.as_deref(), response.ready.unwrap_or(false));

    debug!(
        "Applied response (ready: {}, missing: {:?})",
        response.ready.unwrap_or(false),
        record.missing_required()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::READY_MESSAGE;

    fn fresh() -> (TargetRecord, UiState) {
        (TargetRecord::default(), UiState::initial())
    }

    #[test]
    fn test_partial_values_merge_and_blank_hint_clears() {
        let (mut record, mut ui) = fresh();
        record.name.last = "Doe".to_string();

        apply_response(
            r#"{"values":{"name":{"first":"Jane"}}, "hint":"", "ready":false}"#,
            &mut record,
            &mut ui,
        )
        .unwrap();

        assert_eq!(record.name.first, "Jane");
        assert_eq!(record.name.last, "Doe");
        assert_eq!(ui.hint, None);
    }

    #[test]
    fn test_hint_only_response_leaves_record_unchanged() {
        let (mut record, mut ui) = fresh();
        let before = record.clone();

        apply_response(
            r#"{"values":{}, "hint":"Please provide a zip code.", "ready":false}"#,
            &mut record,
            &mut ui,
        )
        .unwrap();

        assert_eq!(record, before);
        assert_eq!(ui.hint.as_deref(), Some("ℹ️ Please provide a zip code."));
    }

    #[test]
    fn test_ready_overrides_any_hint() {
        let (mut record, mut ui) = fresh();

        apply_response(
            r#"{"values":{"address":{"zipcode":"12345"}}, "hint":"Almost there.", "ready":true}"#,
            &mut record,
            &mut ui,
        )
        .unwrap();

        assert_eq!(record.address.zipcode, "12345");
        assert_eq!(ui.hint.as_deref(), Some(READY_MESSAGE));
    }

    #[test]
    fn test_ready_without_hint_field() {
        let (mut record, mut ui) = fresh();

        apply_response(
            r#"{"values":{"address":{"zipcode":"12345"}}, "ready":true}"#,
            &mut record,
            &mut ui,
        )
        .unwrap();

        assert_eq!(record.address.zipcode, "12345");
        assert_eq!(ui.hint.as_deref(), Some(READY_MESSAGE));
    }

    #[test]
    fn test_malformed_response_changes_nothing() {
        let (mut record, mut ui) = fresh();
        record.name.first = "Jane".to_string();
        ui.hint = Some("previous hint".to_string());

        let result = apply_response("not json at all", &mut record, &mut ui);

        assert!(matches!(result, Err(ApplyError::Malformed(_))));
        assert_eq!(record.name.first, "Jane");
        assert_eq!(ui.hint.as_deref(), Some("previous hint"));
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let raw = r#"{"values":{"name":{"first":"Jane","last":"Doe"}}, "hint":"x", "ready":false}"#;

        let (mut record_once, mut ui_once) = fresh();
        apply_response(raw, &mut record_once, &mut ui_once).unwrap();

        let (mut record_twice, mut ui_twice) = fresh();
        apply_response(raw, &mut record_twice, &mut ui_twice).unwrap();
        apply_response(raw, &mut record_twice, &mut ui_twice).unwrap();

        assert_eq!(record_once, record_twice);
        assert_eq!(ui_once, ui_twice);
    }

    #[test]
    fn test_empty_string_values_overwrite() {
        let (mut record, mut ui) = fresh();
        record.address.city = "Springfield".to_string();

        apply_response(
            r#"{"values":{"address":{"city":""}}, "ready":false}"#,
            &mut record,
            &mut ui,
        )
        .unwrap();

        assert_eq!(record.address.city, "");
    }
}
