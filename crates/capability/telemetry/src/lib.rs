//! 追踪、请求 ID 与进程内计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub readings_created: u64,
    pub latest_upserted: u64,
    pub validation_rejected: u64,
    pub storage_failures: u64,
    pub cleanup_runs: u64,
    pub cleanup_rows_deleted: u64,
    pub cleanup_failures: u64,
}

/// 进程内计数器，无导出器。
#[derive(Default)]
pub struct TelemetryMetrics {
    readings_created: AtomicU64,
    latest_upserted: AtomicU64,
    validation_rejected: AtomicU64,
    storage_failures: AtomicU64,
    cleanup_runs: AtomicU64,
    cleanup_rows_deleted: AtomicU64,
    cleanup_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            readings_created: self.readings_created.load(Ordering::Relaxed),
            latest_upserted: self.latest_upserted.load(Ordering::Relaxed),
            validation_rejected: self.validation_rejected.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
            cleanup_runs: self.cleanup_runs.load(Ordering::Relaxed),
            cleanup_rows_deleted: self.cleanup_rows_deleted.load(Ordering::Relaxed),
            cleanup_failures: self.cleanup_failures.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录历史读数写入次数。
pub fn record_reading_created() {
    metrics().readings_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录最新读数覆盖次数。
pub fn record_latest_upserted() {
    metrics().latest_upserted.fetch_add(1, Ordering::Relaxed);
}

/// 记录校验拒绝次数。
pub fn record_validation_rejected() {
    metrics().validation_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录存储失败（含超时）次数。
pub fn record_storage_failure() {
    metrics().storage_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次成功的清理及其删除行数。
pub fn record_cleanup_run(rows_deleted: u64) {
    let metrics = metrics();
    metrics.cleanup_runs.fetch_add(1, Ordering::Relaxed);
    metrics
        .cleanup_rows_deleted
        .fetch_add(rows_deleted, Ordering::Relaxed);
}

/// 记录清理失败次数。
pub fn record_cleanup_failure() {
    metrics().cleanup_failures.fetch_add(1, Ordering::Relaxed);
}
