/// 声级读数。
///
/// 历史表（`data`）与最新表（`latest_data`）共用同一结构：
/// - 历史表以 `id` 为主键，只追加
/// - 最新表以 `device_id` 为主键，原地覆盖
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    /// 存储分配的自增主键，写入前为 0。
    pub id: i64,
    pub device_id: String,
    pub room_name: String,
    pub sound_level: f64,
    pub threshold: f64,
    /// RFC3339 时间戳。
    pub measure_time: String,
    pub is_alert: bool,
    pub description: String,
    /// 写入模式标记，不落库。
    pub is_periodic: bool,
}

impl Reading {
    /// 声级达到或超过阈值即告警。
    pub fn exceeds_threshold(&self) -> bool {
        self.sound_level >= self.threshold
    }
}
