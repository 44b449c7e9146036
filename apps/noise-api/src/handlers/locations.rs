//! 位置 handlers
//!
//! - GET /locations - 列出位置
//! - POST /locations - 创建位置（总是设为选中）
//! - GET /locations/chosen - 当前选中位置
//! - PUT /locations/{id} - 带 ?newThreshold= 时更新阈值，否则设为选中
//! - DELETE /locations/{id} - 删除位置

use crate::AppState;
use crate::utils::{
    bad_request_error, dto_to_location, internal_error, location_to_dto, not_found_error,
    parse_optional_f64, require_id,
};
use api_contract::messages::{
    FAILED_CREATE_LOCATION, FAILED_GET_CHOSEN_LOCATION, FAILED_GET_LOCATIONS,
    FAILED_SET_CHOSEN_LOCATION, FAILED_UPDATE_THRESHOLD, INTERNAL_ERROR, INVALID_LOCATION_ID,
    INVALID_REQUEST_BODY, INVALID_THRESHOLD_FORMAT, LOCATION_RETRIEVED, LOCATION_UPDATED,
};
use api_contract::{
    ChosenLocationResponse, LocationDto, LocationsResponse, MessageBody, UpdateLocationQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noise_service::ErrorKind;

/// 列出位置
pub async fn list_locations(State(state): State<AppState>) -> Response {
    match state.locations.list_all(state.deadline()).await {
        Ok(items) => {
            let locations = items.into_iter().map(location_to_dto).collect();
            (StatusCode::OK, Json(LocationsResponse { locations })).into_response()
        }
        Err(err) => internal_error("list_locations", &err, FAILED_GET_LOCATIONS),
    }
}

/// 当前选中位置
pub async fn get_chosen_location(State(state): State<AppState>) -> Response {
    match state.locations.get_chosen(state.deadline()).await {
        Ok(Some(location)) => (
            StatusCode::OK,
            Json(ChosenLocationResponse {
                message: LOCATION_RETRIEVED.to_string(),
                data: location_to_dto(location),
            }),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => internal_error("get_chosen_location", &err, FAILED_GET_CHOSEN_LOCATION),
    }
}

/// 创建位置
pub async fn create_location(
    State(state): State<AppState>,
    payload: Result<Json<LocationDto>, JsonRejection>,
) -> Response {
    let Ok(Json(dto)) = payload else {
        return bad_request_error(INVALID_REQUEST_BODY);
    };
    match state
        .locations
        .create(dto_to_location(dto), state.deadline())
        .await
    {
        Ok(location) => (StatusCode::CREATED, Json(location_to_dto(location))).into_response(),
        Err(err) if err.kind() == ErrorKind::Validation => bad_request_error(err.message()),
        Err(err) => internal_error("create_location", &err, FAILED_CREATE_LOCATION),
    }
}

/// 更新阈值或切换选中位置
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UpdateLocationQuery>,
) -> Response {
    let id = match require_id(&id, INVALID_LOCATION_ID) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let threshold = match parse_optional_f64(query.new_threshold.as_deref(), INVALID_THRESHOLD_FORMAT)
    {
        Ok(value) => value,
        Err(response) => return response,
    };
    let (result, operation, failure) = match threshold {
        Some(threshold) => (
            state
                .locations
                .update_threshold(id, threshold, state.deadline())
                .await,
            "update_threshold",
            FAILED_UPDATE_THRESHOLD,
        ),
        None => (
            state.locations.set_chosen(id, state.deadline()).await,
            "set_chosen_location",
            FAILED_SET_CHOSEN_LOCATION,
        ),
    };
    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageBody {
                message: LOCATION_UPDATED.to_string(),
            }),
        )
            .into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => not_found_error(),
        Err(err) => internal_error(operation, &err, failure),
    }
}

/// 删除位置
pub async fn delete_location(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match require_id(&id, INVALID_LOCATION_ID) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.locations.delete(id, state.deadline()).await {
        Ok(0) => not_found_error(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => internal_error("delete_location", &err, INTERNAL_ERROR),
    }
}
