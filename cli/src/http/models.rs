//! 请求/响应数据结构

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// 成功信封：`{status, data}` 或 `{status, message}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// 错误信封
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub error: bool,
    pub message: String,
}

/// GET /movies 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
}

/// GET /health 响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session_id: String,
    pub uptime_seconds: u64,
    pub requests_handled: u64,
    pub timestamp: String,
}
