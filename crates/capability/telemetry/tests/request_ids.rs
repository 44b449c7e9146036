use noise_telemetry::new_request_ids;

#[test]
fn request_ids_non_empty_and_distinct() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}
