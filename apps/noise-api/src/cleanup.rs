//! 数据保留清理任务
//!
//! 启动后每隔 `interval` 删除一次超过保留期的历史读数，单次执行受 `timeout` 约束。
//! 收到取消信号后立即退出，正在执行的清理也会被放弃。

use noise_service::{Deadline, ReadingService};
use noise_telemetry::{record_cleanup_failure, record_cleanup_run};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 清理调度参数
#[derive(Debug, Clone, Copy)]
pub struct CleanupSchedule {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for CleanupSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(24 * 60 * 60),
            timeout: Duration::from_secs(30),
        }
    }
}

/// 启动后台清理任务（首次执行在一个周期之后）
pub fn spawn_cleanup(
    readings: Arc<ReadingService>,
    schedule: CleanupSchedule,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + schedule.interval, schedule.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            target: "noise.cleanup",
            interval_secs = schedule.interval.as_secs(),
            "cleanup_scheduled"
        );
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        _ = run_cleanup(&readings, schedule.timeout) => {}
                    }
                }
            }
        }
        info!(target: "noise.cleanup", "cleanup_stopped");
    })
}

/// 执行一次清理，返回删除行数；失败时记录日志并返回 None
pub async fn run_cleanup(readings: &ReadingService, timeout: Duration) -> Option<u64> {
    match readings.clean_old_data(Deadline::after(timeout)).await {
        Ok(deleted) => {
            record_cleanup_run(deleted);
            info!(target: "noise.cleanup", deleted, "cleanup_completed");
            Some(deleted)
        }
        Err(err) => {
            record_cleanup_failure();
            warn!(target: "noise.cleanup", error = %err, "cleanup_failed");
            None
        }
    }
}
