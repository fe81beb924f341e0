//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/health` and `/run` handlers
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown is signalled
//!
//! Each connection is driven by its own Tokio task; handlers share nothing
//! but the immutable `AppState`.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::engine::Engine;
use crate::http::handlers::{health_handler, run_handler};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::normalize::RequestNormalizer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn Engine>,
    pub normalizer: RequestNormalizer,
}

/// HTTP front-end for the engine.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server forwarding to `engine`.
    pub fn new(config: &GatewayConfig, engine: Arc<dyn Engine>) -> Self {
        let state = AppState {
            engine,
            normalizer: RequestNormalizer::new(config.validation.strict_parameters),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", any(health_handler))
            .route("/run", any(run_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Run the server until the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
