//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::net::TcpListener;

use engine_gateway::engine::{Engine, EngineError, EngineResult};
use engine_gateway::{CanonicalRequest, GatewayConfig, HttpServer, Shutdown};

/// What a `RecordingEngine` answers with.
#[derive(Clone)]
pub enum Reply {
    Output(String),
    Failure(String),
}

/// In-process engine that records every request it receives.
pub struct RecordingEngine {
    reply: Reply,
    calls: Mutex<Vec<CanonicalRequest>>,
}

impl RecordingEngine {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CanonicalRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Engine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn run(&self, request: CanonicalRequest) -> BoxFuture<'_, EngineResult<String>> {
        self.calls.lock().unwrap().push(request);
        let reply = self.reply.clone();
        Box::pin(async move {
            match reply {
                Reply::Output(out) => Ok(out),
                Reply::Failure(msg) => Err(EngineError::Transport(msg)),
            }
        })
    }
}

/// A running gateway bound to an ephemeral port.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway with the given engine.
pub async fn start_gateway(config: GatewayConfig, engine: Arc<dyn Engine>) -> Gateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&config, engine);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

/// Start a mock engine service answering `POST /run` with a fixed reply.
/// Returns its address and the JSON bodies it received.
pub async fn start_mock_engine(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = (received.clone(), status, body);

    let app = Router::new()
        .route(
            "/run",
            post(
                |State((received, status, body)): State<(Arc<Mutex<Vec<Value>>>, u16, &'static str)>,
                 raw: String| async move {
                    if let Ok(value) = serde_json::from_str::<Value>(&raw) {
                        received.lock().unwrap().push(value);
                    }
                    (StatusCode::from_u16(status).unwrap(), body)
                },
            ),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, received)
}

/// HTTP client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
