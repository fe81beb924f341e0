//! Engine gateway: an HTTP front-end that normalizes run requests and
//! forwards them to an algorithm engine.
//!
//! # Architecture Overview
//!
//! ```text
//!     POST /run ──▶ http::server ──▶ normalize ──▶ engine ──▶ http::response ──▶ client
//!                        │              │             │
//!                        │       CanonicalRequest   upstream HTTP service
//!                        │       or 400             or child process
//!                        │
//!     GET /health ──▶ "OK"
//! ```
//!
//! Cross-cutting: `config` (TOML + `PORT`), `observability` (tracing,
//! Prometheus), `lifecycle` (signals, graceful shutdown).

// Core subsystems
pub mod config;
pub mod engine;
pub mod http;
pub mod normalize;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use engine::{Engine, EngineError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use normalize::{CanonicalRequest, RequestNormalizer, ValidationFailure};
