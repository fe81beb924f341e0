//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Engine the canonical request is forwarded to.
    pub engine: EngineConfig,

    /// Payload validation policy.
    pub validation: ValidationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Engine selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineConfig {
    /// Engine service reached with HTTP POST.
    Upstream {
        /// Absolute `http://` URL of the engine's run endpoint.
        url: String,

        /// Per-call timeout in seconds (none = wait indefinitely).
        #[serde(default)]
        timeout_secs: Option<u64>,
    },

    /// Engine executable spawned per request.
    Command {
        /// Program to execute.
        program: String,

        /// Arguments passed to the program.
        #[serde(default)]
        args: Vec<String>,

        /// Per-call timeout in seconds (none = wait indefinitely).
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl EngineConfig {
    pub fn timeout_secs(&self) -> Option<u64> {
        match self {
            EngineConfig::Upstream { timeout_secs, .. } => *timeout_secs,
            EngineConfig::Command { timeout_secs, .. } => *timeout_secs,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::Upstream {
            url: "http://127.0.0.1:9000/run".to_string(),
            timeout_secs: None,
        }
    }
}

/// Payload validation policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject unreadable optional parameters instead of treating them as absent.
    pub strict_parameters: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
