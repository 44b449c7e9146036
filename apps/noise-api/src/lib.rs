//! 噪声监测 HTTP API。
//!
//! - 路由与中间件装配：[`routes::build_app`]
//! - 读数 / 位置 handlers：[`handlers`]
//! - 数据保留清理任务：[`cleanup`]
//! - 存储后端装配：[`storage`]

pub mod cleanup;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod storage;
pub mod utils;

use noise_service::{Deadline, LocationService, ReadingService};
use std::sync::Arc;
use std::time::Duration;

/// handler 共享状态。
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<ReadingService>,
    pub locations: Arc<LocationService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        readings: Arc<ReadingService>,
        locations: Arc<LocationService>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            readings,
            locations,
            request_timeout,
        }
    }

    /// 本次请求的截止时间。
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}
