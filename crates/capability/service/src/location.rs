//! 位置服务：维护“至多一个选中位置”与位置阈值。

use crate::deadline::Deadline;
use crate::error::ServiceError;
use domain::{DEFAULT_THRESHOLD, Location};
use noise_storage::LocationStore;
use std::sync::Arc;
use tracing::info;

pub struct LocationService {
    locations: Arc<dyn LocationStore>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationStore>) -> Self {
        Self { locations }
    }

    /// 创建位置并设为选中（原选中位置在同一事务内取消）。
    ///
    /// 阈值为 0 时取默认 70 dB。
    pub async fn create(
        &self,
        location: Location,
        deadline: Deadline,
    ) -> Result<Location, ServiceError> {
        if location.name.is_empty() {
            return Err(ServiceError::validation("Location name is required"));
        }
        let threshold = if location.threshold == 0.0 {
            DEFAULT_THRESHOLD
        } else {
            location.threshold
        };
        let candidate = Location {
            id: 0,
            chosen: true,
            threshold,
            ..location
        };
        let created = deadline.run(self.locations.create(&candidate)).await?;
        info!(target: "noise.service", id = created.id, name = %created.name, "location_created");
        Ok(created)
    }

    pub async fn list_all(&self, deadline: Deadline) -> Result<Vec<Location>, ServiceError> {
        deadline.run(self.locations.read_all()).await
    }

    pub async fn get_chosen(&self, deadline: Deadline) -> Result<Option<Location>, ServiceError> {
        deadline.run(self.locations.read_chosen()).await
    }

    /// 切换选中位置；id 不存在时返回 NotFound，原选中保持不变。
    pub async fn set_chosen(&self, id: i64, deadline: Deadline) -> Result<(), ServiceError> {
        if !deadline.run(self.locations.set_chosen(id)).await? {
            return Err(ServiceError::not_found(format!("location {id} not found")));
        }
        info!(target: "noise.service", id, "chosen_location_changed");
        Ok(())
    }

    /// 更新位置阈值（不做范围校验）。
    pub async fn update_threshold(
        &self,
        id: i64,
        threshold: f64,
        deadline: Deadline,
    ) -> Result<(), ServiceError> {
        if !deadline
            .run(self.locations.update_threshold(id, threshold))
            .await?
        {
            return Err(ServiceError::not_found(format!("location {id} not found")));
        }
        info!(target: "noise.service", id, threshold, "location_threshold_updated");
        Ok(())
    }

    /// 按 id 删除位置，返回受影响行数；历史读数不受影响。
    pub async fn delete(&self, id: i64, deadline: Deadline) -> Result<u64, ServiceError> {
        let affected = deadline.run(self.locations.delete(id)).await?;
        info!(target: "noise.service", id, affected, "location_deleted");
        Ok(affected)
    }
}
