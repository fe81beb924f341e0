//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → handlers.rs (/health, /run method check, body read)
//!     → normalize (payload → CanonicalRequest)
//!     → engine (CanonicalRequest → JSON text)
//!     → response.rs (outcome → status + JSON body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::{EngineOutput, ServiceError};
pub use server::{AppState, HttpServer};
