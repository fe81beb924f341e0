//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected and returned together.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{EngineConfig, GatewayConfig};
use crate::engine::upstream::parse_url;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    match &config.engine {
        EngineConfig::Upstream { url, .. } => {
            if let Err(e) = parse_url(url) {
                errors.push(ValidationError::new("engine.url", e.to_string()));
            }
        }
        EngineConfig::Command { program, .. } => {
            if program.trim().is_empty() {
                errors.push(ValidationError::new("engine.program", "must not be empty"));
            }
        }
    }

    if config.engine.timeout_secs() == Some(0) {
        errors.push(ValidationError::new("engine.timeout_secs", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
