//! 存储接口 Trait 定义
//!
//! - ReadingStore：历史读数（`data`）与最新读数（`latest_data`）
//! - LocationStore：监测位置
//!
//! 所有接口返回 StorageError，使用 async_trait 支持 `Arc<dyn ...>` 动态分发。
//! 超时与取消由调用方（服务层）包裹 future 实现，存储层不感知。

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{Location, Reading};

/// 读数存储接口
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// 追加一条历史读数，返回分配的 id
    async fn create_historical(&self, reading: &Reading) -> Result<i64, StorageError>;

    /// 按 device_id 覆盖写入最新读数
    async fn upsert_latest(&self, reading: &Reading) -> Result<(), StorageError>;

    /// 按 id 读取历史读数
    async fn read_one(&self, id: i64) -> Result<Option<Reading>, StorageError>;

    /// 读取设备的最新读数
    async fn read_latest(&self, device_id: &str) -> Result<Option<Reading>, StorageError>;

    /// 分页读取历史读数（按 id 升序）
    async fn read_page(&self, limit: i64, offset: i64) -> Result<Vec<Reading>, StorageError>;

    /// 读取全部历史读数（按 id 升序）
    async fn read_all(&self) -> Result<Vec<Reading>, StorageError>;

    /// 按 id 更新历史读数，返回受影响行数
    async fn update(&self, reading: &Reading) -> Result<u64, StorageError>;

    /// 按 id 删除历史读数，返回受影响行数
    async fn delete(&self, id: i64) -> Result<u64, StorageError>;

    /// 读取房间内 measure_time >= since 的历史读数
    async fn read_by_room_since(
        &self,
        room_name: &str,
        since: &str,
    ) -> Result<Vec<Reading>, StorageError>;

    /// 读取房间内 start <= measure_time < end 的历史读数（按时间升序）
    async fn read_by_room_between(
        &self,
        room_name: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<Reading>, StorageError>;

    /// 删除 measure_time 早于 cutoff 的历史读数，返回删除行数
    async fn delete_before(&self, cutoff: &str) -> Result<u64, StorageError>;
}

/// 位置存储接口
///
/// chosen 的唯一性依赖事务：先全部取消，再设置目标行。
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// 写入位置；`chosen` 为 true 时在同一事务内取消原有选中。返回带 id 的记录
    async fn create(&self, location: &Location) -> Result<Location, StorageError>;

    /// 读取全部位置（按名称排序）
    async fn read_all(&self) -> Result<Vec<Location>, StorageError>;

    /// 读取当前选中的位置
    async fn read_chosen(&self) -> Result<Option<Location>, StorageError>;

    /// 将指定位置设为唯一选中；id 不存在时回滚并返回 false
    async fn set_chosen(&self, id: i64) -> Result<bool, StorageError>;

    /// 更新位置阈值；id 不存在时返回 false
    async fn update_threshold(&self, id: i64, threshold: f64) -> Result<bool, StorageError>;

    /// 按 id 删除位置，返回受影响行数
    async fn delete(&self, id: i64) -> Result<u64, StorageError>;
}
