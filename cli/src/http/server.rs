//! HTTP服务器生命周期管理

use crate::http::{
    middleware::{apply_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};
use axum::middleware;
use reel_core::api::HttpServerConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

/// 启动HTTP服务器，直到收到 Ctrl+C 或 SIGTERM
pub async fn start_server(config: &HttpServerConfig, state: AppState) -> anyhow::Result<()> {
    info!(
        "Starting HTTP server on {}:{} (session: {}, backend: {})",
        config.host,
        config.port,
        state.session_id,
        state.movies.name()
    );

    // 构建路由并添加中间件
    let app = apply_middleware_stack(
        create_router(state).layer(middleware::from_fn(request_logger)),
        Duration::from_secs(config.request_timeout_secs),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM signal");
        }
    }
    info!("Starting graceful shutdown...");
}

/// 等待 SIGTERM 信号（Unix系统）
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to setup SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Windows 系统不支持 SIGTERM，使用空操作
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
