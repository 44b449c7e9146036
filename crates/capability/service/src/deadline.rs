//! 操作截止时间。
//!
//! 存储调用被包在 `timeout_at` 中，到期即丢弃 future，
//! 连接池中的语句随之取消，调用方得到 Internal 错误。

use crate::error::ServiceError;
use noise_storage::StorageError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// 从现在起 `timeout` 后到期。
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
        }
    }

    /// 在截止时间内执行存储调用。
    pub async fn run<T, F>(&self, future: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout_at(self.at, future).await {
            Ok(result) => result.map_err(ServiceError::from),
            Err(_) => Err(ServiceError::deadline_exceeded()),
        }
    }
}
