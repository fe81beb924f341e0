//! Endpoint handlers.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::{self, EngineOutput, ServiceError};
use crate::http::server::AppState;
use crate::normalize::decode_payload;
use crate::observability::metrics;

/// `GET /health`: always `200 OK`, no input inspected.
pub async fn health_handler() -> Response {
    response::health()
}

/// `POST /run`: normalize the payload and hand it to the engine.
pub async fn run_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();

    let (outcome, response) = match process(&state, request).await {
        Ok(output) => {
            tracing::info!(
                request_id = %request_id,
                engine = state.engine.name(),
                latency_ms = start.elapsed().as_millis() as u64,
                "Engine run completed"
            );
            ("ok", output.into_response())
        }
        Err(err) => {
            let reason = err.reason();
            match &err {
                ServiceError::Engine(e) => tracing::error!(
                    request_id = %request_id,
                    engine = state.engine.name(),
                    error = %e,
                    "Engine run failed"
                ),
                ServiceError::MethodNotAllowed => tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    "Method not allowed on /run"
                ),
                _ => tracing::warn!(
                    request_id = %request_id,
                    reason,
                    error = %err,
                    "Rejected run request"
                ),
            }
            (reason, err.into_response())
        }
    };

    metrics::record_request(outcome, response.status().as_u16(), start);
    response
}

async fn process(state: &AppState, request: Request<Body>) -> Result<EngineOutput, ServiceError> {
    if request.method() != Method::POST {
        return Err(ServiceError::MethodNotAllowed);
    }

    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|_| ServiceError::MalformedBody)?;
    let payload = decode_payload(&body).ok_or(ServiceError::MalformedBody)?;
    let canonical = state.normalizer.normalize(&payload)?;

    tracing::debug!(
        action_bins = canonical.action_signal.len(),
        row_data_bytes = canonical.row_data.len(),
        "Payload normalized"
    );

    let output = state.engine.run(canonical).await.map_err(|e| {
        metrics::record_engine_failure(state.engine.name());
        e
    })?;

    Ok(EngineOutput(output))
}
