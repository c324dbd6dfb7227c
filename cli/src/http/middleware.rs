//! HTTP中间件配置

use axum::{
    body::Body,
    error_handling::HandleErrorLayer,
    extract::State,
    http::{header, HeaderValue, Method, Request},
    middleware::Next,
    response::Response,
    BoxError, Router,
};
use std::time::{Duration, Instant};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::http::{error::HttpServerError, state::AppState};

/// 挂载中间件栈：超时在内层（超时错误转为信封），CORS 在外层
pub fn apply_middleware_stack(router: Router, timeout: Duration) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(timeout),
        )
        .layer(create_cors_layer())
}

/// 创建CORS中间件 - 仅允许localhost
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            |origin: &HeaderValue, _| {
                origin
                    .to_str()
                    .map(|s| {
                        s.starts_with("http://localhost")
                            || s.starts_with("https://localhost")
                            || s.starts_with("http://127.0.0.1")
                            || s.starts_with("https://127.0.0.1")
                    })
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// 超时中间件的错误处理
async fn handle_timeout_error(err: BoxError) -> HttpServerError {
    if err.is::<tower::timeout::error::Elapsed>() {
        HttpServerError::Timeout
    } else {
        HttpServerError::Internal(err.to_string())
    }
}

/// 请求日志中间件
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    // 根据状态码选择日志级别
    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// 统计中间件：响应完成后计数
pub async fn track_stats(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let response = next.run(req).await;
    state.record_request();
    response
}
