//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：error_response, bad_request_error, not_found_error, internal_error, service_error
//! - DTO 转换：reading_to_dto, dto_to_reading, location_to_dto, dto_to_location
//!
//! 错误体统一为 `{"error": "..."}`；内部错误只记录日志，不向客户端暴露细节。

use api_contract::messages::{INTERNAL_ERROR, RESOURCE_NOT_FOUND};
use api_contract::{ErrorBody, LocationDto, ReadingDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{Location, Reading};
use noise_service::{ErrorKind, ServiceError};
use noise_telemetry::record_storage_failure;
use tracing::warn;

/// 构造错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// 400 错误响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

/// 404 错误响应
pub fn not_found_error() -> Response {
    error_response(StatusCode::NOT_FOUND, RESOURCE_NOT_FOUND)
}

/// 500 错误响应：记录原始错误，返回给定文案
pub fn internal_error(operation: &'static str, err: &ServiceError, message: &str) -> Response {
    record_storage_failure();
    warn!(target: "noise.api", operation, error = %err, "request_failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// 按错误类别映射状态码
///
/// - Validation → 400，透传消息
/// - NotFound → 404
/// - Internal → 500
pub fn service_error(operation: &'static str, err: ServiceError) -> Response {
    match err.kind() {
        ErrorKind::Validation => bad_request_error(err.message()),
        ErrorKind::NotFound => not_found_error(),
        ErrorKind::Internal => internal_error(operation, &err, INTERNAL_ERROR),
    }
}

/// Reading 转 ReadingDto
pub fn reading_to_dto(reading: Reading) -> ReadingDto {
    ReadingDto {
        id: reading.id,
        device_id: reading.device_id,
        room_name: reading.room_name,
        sound_level: reading.sound_level,
        threshold: reading.threshold,
        measure_time: reading.measure_time,
        is_alert: reading.is_alert,
        description: reading.description,
        is_periodic: reading.is_periodic,
    }
}

/// ReadingDto 转 Reading
pub fn dto_to_reading(dto: ReadingDto) -> Reading {
    Reading {
        id: dto.id,
        device_id: dto.device_id,
        room_name: dto.room_name,
        sound_level: dto.sound_level,
        threshold: dto.threshold,
        measure_time: dto.measure_time,
        is_alert: dto.is_alert,
        description: dto.description,
        is_periodic: dto.is_periodic,
    }
}

/// Location 转 LocationDto
pub fn location_to_dto(location: Location) -> LocationDto {
    LocationDto {
        id: location.id,
        name: location.name,
        chosen: location.chosen,
        threshold: location.threshold,
    }
}

/// LocationDto 转 Location
pub fn dto_to_location(dto: LocationDto) -> Location {
    Location {
        id: dto.id,
        name: dto.name,
        chosen: dto.chosen,
        threshold: dto.threshold,
    }
}
