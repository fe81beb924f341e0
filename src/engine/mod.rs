//! Algorithm engine boundary.
//!
//! # Data Flow
//! ```text
//! CanonicalRequest
//!     → serialized as one flat JSON object
//!     → upstream.rs (HTTP POST to the engine service)
//!       or command.rs (engine process, JSON on stdin, JSON on stdout)
//!     → engine JSON text, returned verbatim
//! ```
//!
//! # Design Decisions
//! - The handler awaits an engine call as a single step; no retries
//! - Timeouts are optional and off unless configured
//! - Engines never inspect or rewrite their output

pub mod command;
pub mod upstream;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::normalize::CanonicalRequest;

pub use command::CommandEngine;
pub use upstream::UpstreamEngine;

/// Errors surfaced by an engine call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine could not be built from its configuration.
    #[error("engine configuration error: {0}")]
    Config(String),

    /// Canonical request could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Upstream engine could not be reached.
    #[error("engine unreachable: {0}")]
    Transport(String),

    /// Upstream engine answered with a non-success status.
    #[error("engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Call exceeded the configured timeout.
    #[error("engine timed out after {0} seconds")]
    Timeout(u64),

    /// Engine process could not be started or awaited.
    #[error("engine process failed: {0}")]
    Process(#[source] std::io::Error),

    /// Engine process exited unsuccessfully.
    #[error("engine process exited with status {status}: {stderr}")]
    Exit { status: String, stderr: String },

    /// Engine output was not UTF-8 text.
    #[error("engine output is not valid UTF-8")]
    InvalidOutput,
}

/// Result type for engine calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Executes the algorithm for one canonical request.
pub trait Engine: Send + Sync {
    /// Short label for logs and metrics.
    fn name(&self) -> &'static str;

    /// Run the algorithm, returning its JSON output.
    fn run(&self, request: CanonicalRequest) -> BoxFuture<'_, EngineResult<String>>;
}

/// Build the engine selected by configuration.
pub fn from_config(config: &EngineConfig) -> EngineResult<Arc<dyn Engine>> {
    match config {
        EngineConfig::Upstream { url, timeout_secs } => {
            Ok(Arc::new(UpstreamEngine::new(url, *timeout_secs)?))
        }
        EngineConfig::Command {
            program,
            args,
            timeout_secs,
        } => Ok(Arc::new(CommandEngine::new(
            program.clone(),
            args.clone(),
            *timeout_secs,
        ))),
    }
}

/// Apply an optional timeout to an engine call.
pub(crate) async fn bounded<F>(timeout_secs: Option<u64>, call: F) -> EngineResult<String>
where
    F: Future<Output = EngineResult<String>>,
{
    match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), call)
            .await
            .map_err(|_| EngineError::Timeout(secs))?,
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".to_string())
        };
        let err = bounded(Some(0), slow).await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout(0)));

        let fast = async { Ok("{}".to_string()) };
        assert_eq!(bounded(Some(5), fast).await.unwrap(), "{}");
        assert_eq!(bounded(None, async { Ok("x".to_string()) }).await.unwrap(), "x");
    }

    #[test]
    fn test_from_config() {
        let engine = from_config(&EngineConfig::default()).unwrap();
        assert_eq!(engine.name(), "upstream");

        let engine = from_config(&EngineConfig::Command {
            program: "engine-bin".into(),
            args: vec![],
            timeout_secs: None,
        })
        .unwrap();
        assert_eq!(engine.name(), "command");

        let bad = EngineConfig::Upstream {
            url: "not a url".into(),
            timeout_secs: None,
        };
        assert!(matches!(from_config(&bad), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "engine returned status 502: bad gateway");
        assert_eq!(EngineError::Timeout(3).to_string(), "engine timed out after 3 seconds");
    }
}
