//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health（不经过认证）
//! - 读数：/data, /data/:id, /data/weekly/:room, /data/daily/:room
//! - 位置：/locations, /locations/chosen, /locations/:id
//!
//! 业务路由同时挂在 / 和 /api/ 两种前缀下。

use super::AppState;
use super::handlers::*;
use super::middleware::{
    BasicCredentials, cors_layer, request_context, require_basic_auth, require_json_body,
};
use axum::{
    Router, middleware,
    routing::{get, put},
};
use noise_config::AppConfig;
use std::sync::Arc;

/// HTTP 层选项
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub basic_auth: Option<BasicCredentials>,
    pub cors_allow_origin: String,
}

impl HttpOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            basic_auth: config.basic_auth.as_ref().map(BasicCredentials::from),
            cors_allow_origin: config.cors_allow_origin.clone(),
        }
    }
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            basic_auth: None,
            cors_allow_origin: "*".to_string(),
        }
    }
}

/// 创建业务路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/data",
            get(list_readings)
                .post(create_reading)
                .put(update_reading),
        )
        .route("/data/:id", get(get_reading).delete(delete_reading))
        .route("/data/weekly/:room", get(get_weekly))
        .route("/data/daily/:room", get(get_daily))
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/chosen", get(get_chosen_location))
        .route(
            "/locations/:id",
            put(update_location).delete(delete_location),
        )
}

/// 装配完整应用
///
/// 中间件由外到内：request_context → CORS → Basic 认证 → JSON 请求体约束。
/// CORS 在认证之外，预检请求无需凭据。
pub fn build_app(state: AppState, options: &HttpOptions) -> Router {
    let mut api = create_api_router().layer(middleware::from_fn(require_json_body));
    if let Some(credentials) = &options.basic_auth {
        api = api.layer(middleware::from_fn_with_state(
            Arc::new(credentials.clone()),
            require_basic_auth,
        ));
    }
    let api: Router = api.with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api.clone())
        .nest("/api", api)
        .layer(cors_layer(&options.cors_allow_origin))
        .layer(middleware::from_fn(request_context))
}
