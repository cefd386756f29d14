#![allow(clippy::unwrap_used, clippy::expect_used)]

use ttdiff_core::errors::{DumpError, ExErrorKind};
use ttdiff_core::logging_facility::init_test_capture;
use ttdiff_core::{log_op_end, log_op_error, log_op_start};
use ttdiff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_ERR_KIND,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    assert_eq!(start_events, 1, "Should have captured one start event");
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.is(op_name, EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DumpError::SummaryMismatch {
        what: "Class".to_string(),
        declared: 3,
        actual: 2,
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for(op_name);
    let error_event = events
        .iter()
        .find(|e| e.is(op_name, EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_CONSISTENCY_VIOLATION".to_string())
    );
    assert_eq!(
        error_event.fields.get(FIELD_ERR_KIND),
        Some(&format!("{:?}", ExErrorKind::ConsistencyViolation))
    );
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, path = "left.txt");
    log_op_end!(op_name, duration_ms = 7);

    let starts = capture.count_events(|e| e.is(op_name, EVENT_START));
    let ends = capture.count_events(|e| e.is(op_name, EVENT_END));
    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_5";

    log_op_start!(op_name, path = "right.txt", class_id = 114);

    let events = capture.events_for(op_name);
    let start_event = events.first().expect("Should have start event");
    assert_eq!(start_event.fields.get("path"), Some(&"right.txt".to_string()));
    assert_eq!(start_event.fields.get("class_id"), Some(&"114".to_string()));
}

#[test]
fn test_test_capture_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_6";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_error_event_from_parse_failure() {
    let capture = init_test_capture();
    let op_name = "test_error_event_parse_unique_7";

    let err = ttdiff_core::parse_snapshot_str("version: 5.6.0 (Release)\n").unwrap_err();
    log_op_error!(op_name, err.clone(), duration_ms = 1, class_count = 0);

    let events = capture.events_for(op_name);
    let error_event = events
        .iter()
        .find(|e| e.is(op_name, EVENT_END_ERROR))
        .expect("Should have error event for this test");
    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_STREAM_EXHAUSTED".to_string())
    );
    assert_eq!(error_event.fields.get("class_count"), Some(&"0".to_string()));
    assert_eq!(err.kind(), ExErrorKind::StreamExhausted);
}
