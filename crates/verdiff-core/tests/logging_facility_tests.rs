#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use verdiff_core::errors::{DiffError, ExErrorKind};
use verdiff_core::logging_facility::test_capture::init_test_capture;
use verdiff_core::{log_op_end, log_op_error, log_op_start, DiffEngine};
use verdiff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ADDED, FIELD_CHANGED_FIELDS, FIELD_COMPONENT,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_FIELD, FIELD_MODIFIED, FIELD_NEW_LINES,
    FIELD_OLD_LINES, FIELD_REMOVED,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert_eq!(start_events.len(), 1, "Should have exactly one start event");
    assert!(start_events[0].get(FIELD_COMPONENT).is_some());
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].get(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DiffError::invalid_input("new_snapshot", "expected a JSON object");
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    let error_event = &error_events[0];
    assert_eq!(error_event.level, tracing::Level::ERROR);
    assert_eq!(error_event.get(FIELD_ERR_CODE), Some("ERR_INVALID_INPUT"));
    assert_eq!(
        error_event.get(FIELD_ERR_KIND),
        Some(format!("{:?}", ExErrorKind::InvalidInput).as_str())
    );
}

#[test]
fn test_diff_field_logs_start_and_end_with_stats() {
    let capture = init_test_capture();
    let field = "logging_probe_field";

    DiffEngine::default().diff_field(field, "Probe", Some("a\nb"), "a\nc\nd");

    let events: Vec<_> = capture
        .events_for_op("diff_field")
        .into_iter()
        .filter(|e| e.field.as_deref() == Some(field))
        .collect();

    assert_eq!(events.len(), 2, "Expected one start and one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].get(FIELD_FIELD), Some(field));
    assert_eq!(events[1].get(FIELD_ADDED), Some("1"));
    assert_eq!(events[1].get(FIELD_REMOVED), Some("0"));
    assert_eq!(events[1].get(FIELD_MODIFIED), Some("1"));
    assert!(events[1].get(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_unchanged_field_logs_no_changes() {
    let capture = init_test_capture();
    let field = "logging_probe_unchanged";

    DiffEngine::default().diff_field(field, "Probe", Some("same"), "same");

    let end = capture
        .events_for_op("diff_field")
        .into_iter()
        .find(|e| e.field.as_deref() == Some(field) && e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.get("has_changes"), Some("false"));
}

#[test]
fn test_coarse_fallback_emits_warning() {
    let capture = init_test_capture();
    let field = "logging_probe_coarse";
    let engine = DiffEngine::new(verdiff_core::DiffConfig::default().with_max_lines(1)).unwrap();

    engine.diff_field(field, "Probe", Some("a\nb"), "a\nc");

    let warnings: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN && e.field.as_deref() == Some(field))
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].get(FIELD_OLD_LINES), Some("2"));
    assert_eq!(warnings[0].get(FIELD_NEW_LINES), Some("2"));
}

#[test]
fn test_document_json_error_is_logged() {
    let capture = init_test_capture();

    let before = capture.count_events(|e| {
        e.op.as_deref() == Some("diff_document_json")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    let result = DiffEngine::default().diff_document_json(None, &json!(17));
    assert!(result.is_err());

    let after = capture.count_events(|e| {
        e.op.as_deref() == Some("diff_document_json")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    assert!(after > before);
}

#[test]
fn test_diff_document_reports_changed_field_count() {
    let capture = init_test_capture();

    let old = json!({"title": "logging probe title"});
    let new = json!({"title": "logging probe title, edited", "content": "added"});
    DiffEngine::default()
        .diff_document_json(Some(&old), &new)
        .unwrap();

    capture.assert_event_exists("diff_document", EVENT_END);
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("diff_document")
            && e.event.as_deref() == Some(EVENT_END)
            && e.get(FIELD_CHANGED_FIELDS) == Some("2")
    });
    assert!(ends >= 1);
}
