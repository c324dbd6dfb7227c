//! HTTP服务器命令处理器

use std::sync::Arc;

use reel_core::api::{AppConfig, CliError, HttpServerConfig, InMemoryMovieRepository};
use uuid::Uuid;

use crate::commands::cli::ServeArgs;
use crate::http::{server, AppState};

/// 合并配置：CLI 参数优先，配置文件作为默认值
fn effective_config(args: &ServeArgs, cfg: &AppConfig) -> HttpServerConfig {
    let mut config = cfg.http_server.clone();
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config
}

/// 处理 serve 命令
pub async fn handle_http_server(args: ServeArgs, cfg: &AppConfig) -> Result<(), CliError> {
    let config = effective_config(&args, cfg);
    let session_id = args
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let state = AppState::new(session_id, Arc::new(InMemoryMovieRepository::seeded()));

    server::start_server(&config, state)
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}
