use noise_telemetry::{
    TelemetryMetrics, metrics, record_cleanup_failure, record_cleanup_run,
    record_reading_created, record_validation_rejected,
};

#[test]
fn fresh_metrics_start_at_zero() {
    let snapshot = TelemetryMetrics::new().snapshot();
    assert_eq!(snapshot.readings_created, 0);
    assert_eq!(snapshot.cleanup_rows_deleted, 0);
}

#[test]
fn global_counters_accumulate() {
    let before = metrics().snapshot();
    record_reading_created();
    record_validation_rejected();
    record_cleanup_run(5);
    record_cleanup_failure();
    let after = metrics().snapshot();
    assert!(after.readings_created > before.readings_created);
    assert!(after.validation_rejected > before.validation_rejected);
    assert!(after.cleanup_runs > before.cleanup_runs);
    assert!(after.cleanup_rows_deleted >= before.cleanup_rows_deleted + 5);
    assert!(after.cleanup_failures > before.cleanup_failures);
}
