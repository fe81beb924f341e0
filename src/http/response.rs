//! Response shaping.
//!
//! # Outcomes
//! - Engine success → 200, engine JSON passed through unmodified
//! - Malformed body or validation failure → 400 `{"error": ...}`
//! - Engine failure → 200 `{"error": ...}` with `"` replaced by `'`
//! - Wrong method on `/run` → 405 plain text

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::engine::EngineError;
use crate::normalize::ValidationFailure;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Every way a `/run` request can fail.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Body is not a JSON object.
    #[error("invalid json")]
    MalformedBody,

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ServiceError {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ServiceError::MalformedBody => "MalformedBody",
            ServiceError::Validation(failure) => failure.reason(),
            ServiceError::Engine(_) => "EngineFailure",
            ServiceError::MethodNotAllowed => "MethodNotAllowed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::MalformedBody | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Engine(_) => StatusCode::OK,
            ServiceError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ServiceError::MethodNotAllowed => text(status, "Method Not Allowed"),
            ServiceError::Engine(e) => json_error(status, &sanitize_message(&e.to_string())),
            other => json_error(status, &other.to_string()),
        }
    }
}

/// Successful engine output, already JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput(pub String);

impl IntoResponse for EngineOutput {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            self.0,
        )
            .into_response()
    }
}

/// Liveness response.
pub fn health() -> Response {
    text(StatusCode::OK, "OK")
}

/// Replace double quotes so engine messages cannot break out of a JSON string.
pub fn sanitize_message(message: &str) -> String {
    message.replace('"', "'")
}

fn json_error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response()
}

fn text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response()
}
