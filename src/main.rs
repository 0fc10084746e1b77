//! # Pho Gateway
//!
//! Inference request gateway: resolves logical model names to prioritized
//! provider lists, remaps sunset models and disabled vendors, and fails
//! over across candidates until one answers.
//!
//! ## Usage
//!
//! ```bash
//! # Start with the built-in routing table
//! pho-gateway
//!
//! # Start with a custom config file
//! PHO_GATEWAY_CONFIG=/path/to/config.yaml pho-gateway
//!
//! # Environment overrides
//! PHO_GATEWAY_PORT=9000 PHO_GATEWAY_LOG=debug pho-gateway
//! ```

use pho_config::load_config;
use pho_server::{AppState, Server};
use pho_telemetry::{init_logging, LoggingConfig};
use tracing::{error, info};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = init_logging(&LoggingConfig::from_env()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Pho inference gateway"
    );

    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config().await?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        models = config.logical_models.len(),
        disabled_providers = config.disabled_providers.len(),
        "Configuration loaded"
    );

    let state = AppState::builder(config).build();
    let server = Server::new(state);

    server.run().await?;

    Ok(())
}
