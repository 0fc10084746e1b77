//! # Pho Telemetry
//!
//! Structured logging setup for the gateway binary. Field-structured
//! `tracing` events throughout the workspace are rendered here either as
//! human-readable lines for development or JSON for log aggregation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Env var overriding the default log filter.
pub const LOG_FILTER_ENV: &str = "PHO_GATEWAY_LOG";

/// Env var selecting the log output format (`pretty` or `json`).
pub const LOG_FORMAT_ENV: &str = "PHO_GATEWAY_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when the env var is unset
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,pho_gateway=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Build the config from process environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(filter) = std::env::var(LOG_FILTER_ENV) {
            config.filter = filter;
        }
        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            if format.eq_ignore_ascii_case("json") {
                config.format = LogFormat::Json;
            }
        }
        config
    }

    /// Set the default filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Logging initialization error.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed
    #[error("failed to initialize logging: {0}")]
    Init(String),
}

/// Install the global subscriber.
///
/// Call once at process start, before any request handling.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let fmt_layer = match config.format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.format, "Logging initialized");
    Ok(())
}
