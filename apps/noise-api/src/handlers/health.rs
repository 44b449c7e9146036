use api_contract::HealthResponse;
use axum::Json;

/// 健康检查（不经过认证）
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
