//! HTTP错误类型，统一渲染为错误信封

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reel_core::api::MovieError;
use thiserror::Error;

use crate::http::models::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum HttpServerError {
    #[error(transparent)]
    Movie(#[from] MovieError),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl HttpServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpServerError::Movie(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            HttpServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HttpServerError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            HttpServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for HttpServerError {
    fn from(rejection: JsonRejection) -> Self {
        HttpServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpServerError {
    fn from(rejection: QueryRejection) -> Self {
        HttpServerError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        // 状态行与信封中的 status 保持一致
        let status = self.status();
        let body = ErrorEnvelope {
            status: status.as_u16(),
            error: true,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: HttpServerError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_status_matches_body() {
        let (status, body) = render(MovieError::NotFound(7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "the movie 7 does not exist");
    }

    #[tokio::test]
    async fn test_missing_fields_is_forbidden() {
        let (status, body) = render(MovieError::MissingFields.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], 403);
    }

    #[tokio::test]
    async fn test_timeout_and_internal_statuses() {
        let (status, body) = render(HttpServerError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["status"], 408);

        let (status, body) = render(HttpServerError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_invalid_request_is_bad_request() {
        let (status, body) = render(HttpServerError::InvalidRequest("nope".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "nope");
    }
}
