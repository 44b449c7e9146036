//! 读数 handlers
//!
//! - POST /data - 写入读数（is_periodic 决定写历史表还是最新表）
//! - GET /data - 分页列出历史读数（?page=&rowsPerPage=，page < 1 返回全部）
//! - GET /data/{idOrDeviceId} - 数字按 id 查历史，否则按设备查最新
//! - PUT /data - 按请求体 id 更新历史读数
//! - DELETE /data/{id} - 删除历史读数
//! - GET /data/weekly/{room} - 房间近 5 周读数
//! - GET /data/daily/{room}?date= - 房间某日读数
//!
//! 列表类接口结果为空时返回 404，与单资源缺失保持一致。

use crate::AppState;
use crate::utils::{
    DEFAULT_ROWS_PER_PAGE, bad_request_error, dto_to_reading, error_response, internal_error,
    not_found_error, parse_id, parse_optional_i64, reading_to_dto, require_id, service_error,
};
use api_contract::messages::{
    DATE_REQUIRED, INTERNAL_ERROR, INVALID_DATE_FORMAT, INVALID_PAGINATION, INVALID_REQUEST_DATA,
    MISCONFIGURED_ID, NO_DATA_FOR_ROOM, NO_DATA_FOR_ROOM_AND_DATE,
};
use api_contract::{DailyQuery, ReadingDto, ReadingsPageQuery};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::Reading;
use noise_service::ErrorKind;
use noise_service::time::parse_rfc3339;

fn readings_response(items: Vec<Reading>) -> Response {
    let data: Vec<ReadingDto> = items.into_iter().map(reading_to_dto).collect();
    (StatusCode::OK, Json(data)).into_response()
}

/// 写入读数
pub async fn create_reading(
    State(state): State<AppState>,
    payload: Result<Json<ReadingDto>, JsonRejection>,
) -> Response {
    let Ok(Json(dto)) = payload else {
        return bad_request_error(INVALID_REQUEST_DATA);
    };
    match state
        .readings
        .ingest(dto_to_reading(dto), state.deadline())
        .await
    {
        Ok(reading) => (StatusCode::CREATED, Json(reading_to_dto(reading))).into_response(),
        Err(err) => service_error("create_reading", err),
    }
}

/// 分页列出历史读数
pub async fn list_readings(
    State(state): State<AppState>,
    Query(query): Query<ReadingsPageQuery>,
) -> Response {
    let page = match parse_optional_i64(query.page.as_deref(), 0, INVALID_PAGINATION) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let rows_per_page = match parse_optional_i64(
        query.rows_per_page.as_deref(),
        DEFAULT_ROWS_PER_PAGE,
        INVALID_PAGINATION,
    ) {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state
        .readings
        .get_page(page, rows_per_page, state.deadline())
        .await
    {
        Ok(items) if items.is_empty() => not_found_error(),
        Ok(items) => readings_response(items),
        Err(err) => service_error("list_readings", err),
    }
}

/// 按 id 或设备号读取读数
pub async fn get_reading(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let result = match parse_id(&id) {
        Some(id) => state.readings.get_by_id(id, state.deadline()).await,
        None => {
            state
                .readings
                .get_latest_by_device(&id, state.deadline())
                .await
        }
    };
    match result {
        Ok(Some(reading)) => (StatusCode::OK, Json(reading_to_dto(reading))).into_response(),
        Ok(None) => not_found_error(),
        Err(err) if err.kind() == ErrorKind::Validation => bad_request_error(MISCONFIGURED_ID),
        Err(err) => internal_error("get_reading", &err, INTERNAL_ERROR),
    }
}

/// 更新历史读数，成功后回显（含补齐的测量时间）
pub async fn update_reading(
    State(state): State<AppState>,
    payload: Result<Json<ReadingDto>, JsonRejection>,
) -> Response {
    let Ok(Json(dto)) = payload else {
        return bad_request_error(INVALID_REQUEST_DATA);
    };
    let mut reading = dto_to_reading(dto);
    match state.readings.update(&mut reading, state.deadline()).await {
        Ok(0) => not_found_error(),
        Ok(_) => (StatusCode::OK, Json(reading_to_dto(reading))).into_response(),
        Err(err) => service_error("update_reading", err),
    }
}

/// 删除历史读数
pub async fn delete_reading(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match require_id(&id, MISCONFIGURED_ID) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.readings.delete(id, state.deadline()).await {
        Ok(0) => not_found_error(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => service_error("delete_reading", err),
    }
}

/// 房间近 5 周读数
pub async fn get_weekly(State(state): State<AppState>, Path(room): Path<String>) -> Response {
    match state.readings.get_by_room(&room, state.deadline()).await {
        Ok(items) if items.is_empty() => error_response(StatusCode::NOT_FOUND, NO_DATA_FOR_ROOM),
        Ok(items) => readings_response(items),
        Err(err) => service_error("get_weekly", err),
    }
}

/// 房间某日读数
pub async fn get_daily(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Query(query): Query<DailyQuery>,
) -> Response {
    let raw = match query.date.as_deref().map(str::trim) {
        None | Some("") => return bad_request_error(DATE_REQUIRED),
        Some(raw) => raw,
    };
    let Some(date) = parse_rfc3339(raw) else {
        return bad_request_error(INVALID_DATE_FORMAT);
    };
    match state
        .readings
        .get_daily_summary(&room, &date, state.deadline())
        .await
    {
        Ok(items) if items.is_empty() => {
            error_response(StatusCode::NOT_FOUND, NO_DATA_FOR_ROOM_AND_DATE)
        }
        Ok(items) => readings_response(items),
        Err(err) => service_error("get_daily", err),
    }
}
