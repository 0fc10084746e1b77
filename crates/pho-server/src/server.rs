//! HTTP server lifecycle.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::{routes::create_router, state::AppState};

/// Server bind error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Bind address could not be parsed
    #[error("invalid bind address {addr}: {source}")]
    Addr {
        /// The offending host:port string
        addr: String,
        /// Parse failure
        source: std::net::AddrParseError,
    },
    /// Socket error while binding or serving
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The gateway HTTP server.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a server over prepared application state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind and serve until a shutdown signal arrives.
    ///
    /// In-flight requests, including long-lived streaming bodies, are
    /// allowed to finish before the listener closes.
    pub async fn run(self) -> Result<(), ServerError> {
        let server = &self.state.config.server;
        let addr: SocketAddr = format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|source| ServerError::Addr {
                addr: format!("{}:{}", server.host, server.port),
                source,
            })?;

        let listener = TcpListener::bind(addr).await?;
        info!(addr = %addr, "Gateway listening");

        let router = create_router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Gateway stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
