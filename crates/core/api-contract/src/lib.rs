//! 稳定的 DTO 与 API 响应契约。
//!
//! 读数使用 snake_case 字段名，位置查询参数沿用前端的 camelCase
//! （`rowsPerPage`、`newThreshold`）。错误统一为 `{"error": "..."}`。

use serde::{Deserialize, Serialize};

pub mod messages;

/// 读数请求/响应体。
///
/// 反序列化时缺失字段取零值，由服务层补默认值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingDto {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub device_id: String,
    pub room_name: String,
    pub sound_level: f64,
    pub threshold: f64,
    pub measure_time: String,
    pub is_alert: bool,
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_periodic: bool,
}

/// 位置请求/响应体。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationDto {
    pub id: i64,
    pub name: String,
    pub chosen: bool,
    pub threshold: f64,
}

/// 错误响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 仅含提示信息的响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// GET /locations 响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationDto>,
}

/// GET /locations/chosen 响应体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ChosenLocationResponse {
    pub message: String,
    pub data: LocationDto,
}

/// 健康检查响应体。
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /data 分页参数（原样保留字符串，由 handler 解析）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingsPageQuery {
    pub page: Option<String>,
    pub rows_per_page: Option<String>,
}

/// GET /data/daily/{room} 查询参数。
#[derive(Debug, Default, Deserialize)]
pub struct DailyQuery {
    pub date: Option<String>,
}

/// PUT /locations/{id} 查询参数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationQuery {
    pub new_threshold: Option<String>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}
