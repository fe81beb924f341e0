//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid port {0:?}")]
    Port(String),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration: optional file, then `PORT`, then an
/// explicit port (e.g. from the command line).
pub fn resolve_config(
    path: Option<&Path>,
    port: Option<u16>,
) -> Result<GatewayConfig, ConfigError> {
    let env_port = std::env::var(PORT_ENV).ok();
    resolve_with(path, env_port.as_deref(), port)
}

/// Resolve the effective configuration from explicit sources. `cli_port`
/// wins over `env_port`, which wins over the file.
pub fn resolve_with(
    path: Option<&Path>,
    env_port: Option<&str>,
    cli_port: Option<u16>,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(raw) = env_port {
        let port = raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Port(raw.to_string()))?;
        apply_port(&mut config, port)?;
    }
    if let Some(port) = cli_port {
        apply_port(&mut config, port)?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace the port of the listener bind address, keeping its host.
pub fn apply_port(config: &mut GatewayConfig, port: u16) -> Result<(), ConfigError> {
    let host = config
        .listener
        .bind_address
        .rsplit_once(':')
        .map(|(host, _)| host)
        .ok_or_else(|| ConfigError::Port(config.listener.bind_address.clone()))?;
    config.listener.bind_address = format!("{host}:{port}");
    Ok(())
}
