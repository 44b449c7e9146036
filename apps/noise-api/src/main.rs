//! 噪声监测 API 服务入口。

use noise_api::AppState;
use noise_api::cleanup::{CleanupSchedule, spawn_cleanup};
use noise_api::routes::{HttpOptions, build_app};
use noise_api::storage::Storage;
use noise_config::AppConfig;
use noise_service::{LocationService, ReadingService};
use noise_telemetry::init_tracing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let storage = Storage::open(&config.storage, config.db_max_connections).await?;
    info!(target: "noise.api", backend = storage.backend_name(), "storage_ready");

    let readings = Arc::new(
        ReadingService::new(storage.readings.clone(), storage.locations.clone())
            .with_retention_months(config.retention_months),
    );
    let locations = Arc::new(LocationService::new(storage.locations.clone()));
    let state = AppState::new(readings.clone(), locations, config.request_timeout);
    let app = build_app(state, &HttpOptions::from_config(&config));

    let token = CancellationToken::new();
    let cleanup = spawn_cleanup(
        readings,
        CleanupSchedule {
            interval: config.cleanup_interval,
            timeout: config.cleanup_timeout,
        },
        token.clone(),
    );
    tokio::spawn(shutdown_signal(token.clone()));

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(target: "noise.api", addr = %config.http_addr, "http_listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(token.clone().cancelled_owned())
        .await?;

    token.cancel();
    if let Err(err) = cleanup.await {
        tracing::warn!(target: "noise.api", error = %err, "cleanup_join_failed");
    }
    storage.close().await;
    info!(target: "noise.api", "shutdown_complete");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM 后触发取消
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(target: "noise.api", error = %err, "ctrl_c_listen_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(target: "noise.api", error = %err, "sigterm_listen_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "noise.api", "shutdown_requested");
    token.cancel();
}
