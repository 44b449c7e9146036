//! 读数服务：写入（历史 / 最新）、查询、更新删除与数据保留清理。

use crate::deadline::Deadline;
use crate::error::ServiceError;
use crate::time::{day_window, now_wire, retention_cutoff, room_history_since};
use crate::validation::{
    apply_threshold_default, apply_time_and_device_defaults, is_valid_device_id, validate,
};
use chrono::{DateTime, FixedOffset, Utc};
use domain::{Reading, UNKNOWN_ROOM};
use noise_storage::{LocationStore, ReadingStore};
use noise_telemetry::{record_latest_upserted, record_reading_created, record_validation_rejected};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 默认数据保留月数。
pub const DEFAULT_RETENTION_MONTHS: u32 = 6;

/// 读数服务
///
/// 组合读数存储与位置存储：房间名缺省时取当前选中位置。
pub struct ReadingService {
    readings: Arc<dyn ReadingStore>,
    locations: Arc<dyn LocationStore>,
    retention_months: u32,
}

impl ReadingService {
    pub fn new(readings: Arc<dyn ReadingStore>, locations: Arc<dyn LocationStore>) -> Self {
        Self {
            readings,
            locations,
            retention_months: DEFAULT_RETENTION_MONTHS,
        }
    }

    /// 覆盖数据保留月数。
    pub fn with_retention_months(mut self, months: u32) -> Self {
        self.retention_months = months;
        self
    }

    /// 按 `is_periodic` 选择写入历史表或最新表。
    pub async fn ingest(&self, reading: Reading, deadline: Deadline) -> Result<Reading, ServiceError> {
        if reading.is_periodic {
            self.create_historical(reading, deadline).await
        } else {
            self.upsert_latest(reading, deadline).await
        }
    }

    /// 追加历史读数，返回带 id 的读数。
    pub async fn create_historical(
        &self,
        reading: Reading,
        deadline: Deadline,
    ) -> Result<Reading, ServiceError> {
        let mut reading = self.prepare_new(reading, deadline).await?;
        let id = deadline
            .run(self.readings.create_historical(&reading))
            .await?;
        reading.id = id;
        record_reading_created();
        info!(
            target: "noise.service",
            id,
            device_id = %reading.device_id,
            room_name = %reading.room_name,
            sound_level = reading.sound_level,
            is_alert = reading.is_alert,
            "reading_created"
        );
        Ok(reading)
    }

    /// 覆盖写入设备的最新读数。
    pub async fn upsert_latest(
        &self,
        reading: Reading,
        deadline: Deadline,
    ) -> Result<Reading, ServiceError> {
        let reading = self.prepare_new(reading, deadline).await?;
        deadline.run(self.readings.upsert_latest(&reading)).await?;
        record_latest_upserted();
        debug!(
            target: "noise.service",
            device_id = %reading.device_id,
            sound_level = reading.sound_level,
            is_alert = reading.is_alert,
            "latest_upserted"
        );
        Ok(reading)
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        deadline: Deadline,
    ) -> Result<Option<Reading>, ServiceError> {
        deadline.run(self.readings.read_one(id)).await
    }

    /// 读取设备最新读数；device_id 格式错误为校验错误，不存在返回 `None`。
    pub async fn get_latest_by_device(
        &self,
        device_id: &str,
        deadline: Deadline,
    ) -> Result<Option<Reading>, ServiceError> {
        if !is_valid_device_id(device_id) {
            return Err(ServiceError::validation("Invalid device ID"));
        }
        deadline.run(self.readings.read_latest(device_id)).await
    }

    /// 分页读取历史读数，`page < 1` 返回全部。
    pub async fn get_page(
        &self,
        page: i64,
        page_size: i64,
        deadline: Deadline,
    ) -> Result<Vec<Reading>, ServiceError> {
        if page < 1 {
            return deadline.run(self.readings.read_all()).await;
        }
        if page_size < 1 {
            return Err(ServiceError::validation("Rows per page must be positive"));
        }
        let offset = page_size
            .checked_mul(page - 1)
            .ok_or_else(|| ServiceError::validation("Page out of range"))?;
        deadline
            .run(self.readings.read_page(page_size, offset))
            .await
    }

    /// 房间近 5 周的历史读数。
    pub async fn get_by_room(
        &self,
        room_name: &str,
        deadline: Deadline,
    ) -> Result<Vec<Reading>, ServiceError> {
        require_room(room_name)?;
        let since = room_history_since(Utc::now());
        deadline
            .run(self.readings.read_by_room_since(room_name, &since))
            .await
    }

    /// 房间在 `date` 所在自然日内的历史读数（按时间升序）。
    pub async fn get_daily_summary(
        &self,
        room_name: &str,
        date: &DateTime<FixedOffset>,
        deadline: Deadline,
    ) -> Result<Vec<Reading>, ServiceError> {
        require_room(room_name)?;
        let (start, end) = day_window(date)?;
        deadline
            .run(self.readings.read_by_room_between(room_name, &start, &end))
            .await
    }

    /// 重新校验后按 id 更新历史读数，返回受影响行数（0 表示不存在）。
    ///
    /// 仅补齐空的测量时间（原地写回），不补阈值、不重算告警标记。
    pub async fn update(
        &self,
        reading: &mut Reading,
        deadline: Deadline,
    ) -> Result<u64, ServiceError> {
        if reading.measure_time.is_empty() {
            reading.measure_time = now_wire();
        }
        check(reading)?;
        let affected = deadline.run(self.readings.update(reading)).await?;
        info!(target: "noise.service", id = reading.id, affected, "reading_updated");
        Ok(affected)
    }

    /// 按 id 删除历史读数，返回受影响行数。
    pub async fn delete(&self, id: i64, deadline: Deadline) -> Result<u64, ServiceError> {
        let affected = deadline.run(self.readings.delete(id)).await?;
        info!(target: "noise.service", id, affected, "reading_deleted");
        Ok(affected)
    }

    /// 删除超过保留期的历史读数，返回删除行数。
    pub async fn clean_old_data(&self, deadline: Deadline) -> Result<u64, ServiceError> {
        let cutoff = retention_cutoff(Utc::now(), self.retention_months)?;
        let deleted = deadline.run(self.readings.delete_before(&cutoff)).await?;
        info!(target: "noise.service", cutoff = %cutoff, deleted, "old_data_cleaned");
        Ok(deleted)
    }

    async fn prepare_new(
        &self,
        mut reading: Reading,
        deadline: Deadline,
    ) -> Result<Reading, ServiceError> {
        apply_threshold_default(&mut reading);
        if reading.room_name.is_empty() {
            reading.room_name = self.resolve_room(deadline).await;
        }
        apply_time_and_device_defaults(&mut reading, &now_wire());
        check(&reading)?;
        reading.is_alert = reading.exceeds_threshold();
        Ok(reading)
    }

    /// 当前选中位置的名称；查不到或查询失败时为 "Unknown"。
    async fn resolve_room(&self, deadline: Deadline) -> String {
        match deadline.run(self.locations.read_chosen()).await {
            Ok(Some(location)) => location.name,
            Ok(None) => UNKNOWN_ROOM.to_string(),
            Err(err) => {
                warn!(target: "noise.service", error = %err, "chosen_location_lookup_failed");
                UNKNOWN_ROOM.to_string()
            }
        }
    }
}

fn check(reading: &Reading) -> Result<(), ServiceError> {
    validate(reading).map_err(|message| {
        record_validation_rejected();
        ServiceError::validation(format!("Invalid data: {message}"))
    })
}

fn require_room(room_name: &str) -> Result<(), ServiceError> {
    if room_name.is_empty() {
        return Err(ServiceError::validation("Room name is required"));
    }
    Ok(())
}
