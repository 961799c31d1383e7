//! Error responses for the HTTP API.
//!
//! Every failure is rendered as `{ "error", "code", "retryable" }` with a
//! status derived from the error code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use comment_insights::{AnalysisError, ErrorCode, IngestError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: ErrorCode,
    retryable: bool,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError
        | ErrorCode::InvalidUrl
        | ErrorCode::NoComments
        | ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::CommentsDisabled | ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::VideoNotFound => StatusCode::NOT_FOUND,
        ErrorCode::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ConfigError | ErrorCode::ParseError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::UpstreamError | ErrorCode::NetworkError => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "Request failed");
        } else {
            tracing::info!(code = %self.code, error = %self.message, "Request rejected");
        }

        let body = ErrorBody {
            retryable: self.code.is_retryable(),
            error: self.message,
            code: self.code,
        };
        (status, Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::validation(e.body_text())
    }
}

/// Render middleware failures, chiefly the whole-request timeout.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::new(ErrorCode::NetworkError, "request timed out")
    } else {
        ApiError::new(ErrorCode::UpstreamError, format!("unhandled middleware error: {err}"))
    }
}
