#![allow(clippy::unwrap_used, clippy::expect_used)]

use umdiff_core::errors::UmdiffError;
use umdiff_core::logging_facility::test_capture::init_test_capture;
use umdiff_core::source::{FetchFailure, Resolver, Transport};
use umdiff_core::{diff_aggregate, log_op_end, log_op_error, log_op_start, parse};
use umdiff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ARCH_COUNT, FIELD_BYTES, FIELD_DURATION_MS,
    FIELD_ENTRY_COUNT, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_ORIGIN, FIELD_REFERENCE,
};
use url::Url;

struct NoNetwork;

impl Transport for NoNetwork {
    fn get_text(&self, _url: &Url) -> Result<String, FetchFailure> {
        Err(FetchFailure::Connect("network disabled".to_string()))
    }
}

struct Canned(&'static str);

impl Transport for Canned {
    fn get_text(&self, _url: &Url) -> Result<String, FetchFailure> {
        Ok(self.0.to_string())
    }
}

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.find(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = UmdiffError::ArchitectureSetMismatch {
        missing_labels: vec!["arm64".to_string()],
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(
        error_events[0].field(FIELD_ERR_CODE),
        Some("ERR_ARCHITECTURE_SET_MISMATCH")
    );
    assert_eq!(
        error_events[0].field(FIELD_ERR_KIND),
        Some("ArchitectureSetMismatch")
    );
}

#[test]
fn test_parse_emits_start_and_end_with_entry_count() {
    let capture = init_test_capture();
    let origin = "logging-parse-unique.manifest";

    parse("a\t1\nb\t2\n", origin).unwrap();

    let ends = capture.find_with("parse_manifest", EVENT_END, FIELD_ORIGIN, origin);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field(FIELD_ENTRY_COUNT), Some("2"));
    assert!(ends[0].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_parse_failure_emits_end_error_not_end() {
    let capture = init_test_capture();
    let origin = "logging-parse-failure-unique.manifest";

    parse("a\n", origin).unwrap_err();

    let for_origin =
        |event: &str| capture.find_with("parse_manifest", event, FIELD_ORIGIN, origin).len();
    assert_eq!(for_origin(EVENT_START), 1);
    assert_eq!(for_origin(EVENT_END_ERROR), 1);
    assert_eq!(for_origin(EVENT_END), 0);
}

#[test]
fn test_resolve_failure_logs_reference() {
    let capture = init_test_capture();
    let reference = "https://logging-resolve-unique.invalid/m";

    let resolver = Resolver::with_transport(NoNetwork);
    resolver.resolve(reference).unwrap_err();

    let errors = capture.find_with("resolve_manifest", EVENT_END_ERROR, FIELD_REFERENCE, reference);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_SOURCE_UNAVAILABLE"));
}

#[test]
fn test_resolve_success_logs_byte_count() {
    let capture = init_test_capture();
    let reference = "https://logging-resolve-bytes-unique.invalid/m";

    let resolver = Resolver::with_transport(Canned("bash\t5.2\n"));
    resolver.resolve(reference).unwrap();

    let ends = capture.find_with("resolve_manifest", EVENT_END, FIELD_REFERENCE, reference);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field(FIELD_BYTES), Some("9"));
}

#[test]
fn test_aggregate_logs_arch_count() {
    let capture = init_test_capture();
    let mut old = std::collections::BTreeMap::new();
    let mut new = std::collections::BTreeMap::new();
    for label in ["armhf", "ppc64el", "riscv64", "s390x", "i386"] {
        old.insert(label.to_string(), parse("a 1\n", "o").unwrap());
        new.insert(label.to_string(), parse("a 1\n", "n").unwrap());
    }

    diff_aggregate(&old, &new).unwrap();

    let count = capture.count_events(|e| {
        e.is("diff_aggregate", EVENT_END) && e.field(FIELD_ARCH_COUNT) == Some("5")
    });
    assert!(count >= 1);
}
