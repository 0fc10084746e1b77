//! Configuration loading: file, environment overrides, validation.

use crate::GatewayConfig;
use secrecy::SecretString;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming the config file path.
pub const CONFIG_ENV: &str = "PHO_GATEWAY_CONFIG";

/// Environment variable holding the bypass shared secret.
const BYPASS_TOKEN_ENV: &str = "PHO_GATEWAY_LABS_TOKEN";

/// Environment variables overriding the server bind address.
const HOST_ENV: &str = "PHO_GATEWAY_HOST";
const PORT_ENV: &str = "PHO_GATEWAY_PORT";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed as YAML
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file could not be parsed as TOML
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config file has an unrecognized extension
    #[error("unsupported config format: {0} (expected .yaml, .yml, or .toml)")]
    UnsupportedFormat(String),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    /// An environment override could not be applied
    #[error("invalid {var} value: {message}")]
    EnvOverride {
        /// Variable that failed
        var: &'static str,
        /// Why it failed
        message: String,
    },
}

/// Load configuration: file named by `PHO_GATEWAY_CONFIG` if set, else the
/// built-in defaults; then environment overrides; then validation.
pub async fn load_config() -> Result<GatewayConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!(path = %path, "Loading configuration from file");
            from_file(Path::new(&path)).await?
        }
        Err(_) => {
            debug!("No config file set, using built-in defaults");
            GatewayConfig::default()
        }
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Parse a config file, dispatching on extension.
pub async fn from_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&contents)?),
        Some("toml") => Ok(toml::from_str(&contents)?),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    if let Ok(host) = std::env::var(HOST_ENV) {
        config.server.host = host;
    }

    if let Ok(port) = std::env::var(PORT_ENV) {
        config.server.port = port.parse().map_err(|_| ConfigError::EnvOverride {
            var: PORT_ENV,
            message: format!("not a valid port: {port}"),
        })?;
    }

    if let Ok(token) = std::env::var(BYPASS_TOKEN_ENV) {
        if !token.is_empty() {
            config.bypass_token = Some(SecretString::new(token));
        }
    }

    Ok(())
}
