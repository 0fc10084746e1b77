//! Test helper utilities for integration tests

use once_cell::sync::Lazy;
use pho_config::{CandidateConfig, GatewayConfig, LogicalModelConfig, ProviderSettings};
use pho_core::ProviderId;
use pho_server::{create_router, AppState, AppStateBuilder};
use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Initialize tracing for tests (only once)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Initialize tracing for tests
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Gateway test server backed by wiremock provider endpoints
pub struct TestServer {
    /// The server address
    pub addr: SocketAddr,
    /// HTTP client for making requests
    pub client: Client,
    /// Base URL for the server
    pub base_url: String,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawn the gateway over prepared application state
    pub async fn spawn(state: AppState) -> Self {
        let router = create_router(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create client");

        Self {
            addr,
            client,
            base_url: format!("http://{addr}"),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Spawn the gateway from a configuration with default collaborators
    pub async fn with_config(config: GatewayConfig) -> Self {
        Self::spawn(AppState::builder(config).build()).await
    }

    /// Spawn the gateway with builder-level overrides
    pub async fn with_state(builder: AppStateBuilder) -> Self {
        Self::spawn(builder.build()).await
    }

    /// Get the full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON payload
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// POST a JSON payload with a bearer token
    pub async fn post_json_bearer(&self, path: &str, body: &Value, token: &str) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Parse a response body as JSON
    pub async fn json_body(response: Response) -> Value {
        response.json().await.expect("Invalid JSON body")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Build a gateway configuration whose providers point at mock servers.
///
/// The `pho-fast` logical model is wired to groq, cerebras, and the
/// relay in that order; direct openai/anthropic integrations stay
/// disabled as in the shipped defaults.
pub fn mock_config(backends: &[(ProviderId, &MockServer)]) -> GatewayConfig {
    let providers = backends
        .iter()
        .map(|(id, server)| ProviderSettings {
            id: *id,
            enabled: true,
            api_key: Some(SecretString::new(format!("sk-test-{id}"))),
            api_key_env: None,
            base_url: Some(server.uri()),
        })
        .collect();

    GatewayConfig {
        logical_models: vec![LogicalModelConfig {
            id: "pho-fast".to_string(),
            providers: vec![
                CandidateConfig {
                    provider: ProviderId::Groq,
                    model_id: "llama-3.1-8b-instant".to_string(),
                },
                CandidateConfig {
                    provider: ProviderId::Cerebras,
                    model_id: "llama3.1-8b".to_string(),
                },
                CandidateConfig {
                    provider: ProviderId::Vercelaigateway,
                    model_id: "google/gemini-2.0-flash".to_string(),
                },
            ],
        }],
        request_timeout: Duration::from_secs(5),
        providers,
        ..GatewayConfig::default()
    }
}

/// Assert a response has the expected status, with a useful failure message
pub async fn assert_status(response: Response, expected: u16) -> Response {
    let status = response.status().as_u16();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        panic!("unexpected status {status} (expected {expected}), body: {body}");
    }
    response
}
