//! Backend clients.
//!
//! All direct integrations and the relay speak the OpenAI-compatible chat
//! wire format, so one reqwest-backed client covers every provider. The
//! response body is never buffered; it is handed upstream as a byte stream
//! so streaming completions pass through untouched.

use async_trait::async_trait;
use dashmap::DashMap;
use futures::TryStreamExt;
use pho_core::{BackendResponse, GatewayError, ProviderId};
use secrecy::ExposeSecret;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::credentials::ProviderCredentials;

/// Cap on how much of a failed response body is read for the error message.
const ERROR_BODY_LIMIT: usize = 4 * 1024;

/// A client for one backend provider endpoint.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Send a chat completion payload and return the raw backend response.
    ///
    /// Non-2xx statuses and transport failures both surface as
    /// [`GatewayError`] so the orchestrator treats them uniformly.
    async fn chat(&self, payload: &serde_json::Value) -> Result<BackendResponse, GatewayError>;

    /// The provider this client talks to.
    fn provider(&self) -> ProviderId;
}

/// Constructs clients per attempt from resolved credentials.
#[async_trait]
pub trait BackendClientFactory: Send + Sync {
    /// Build (or reuse) a client for `provider` with the given credentials.
    async fn client_for(
        &self,
        provider: ProviderId,
        credentials: &ProviderCredentials,
    ) -> Result<Arc<dyn BackendClient>, GatewayError>;
}

/// reqwest-backed client for an OpenAI-compatible endpoint.
pub struct HttpBackendClient {
    provider: ProviderId,
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpBackendClient {
    /// Create a client bound to one provider endpoint.
    #[must_use]
    pub fn new(
        provider: ProviderId,
        http: reqwest::Client,
        credentials: &ProviderCredentials,
    ) -> Self {
        Self {
            provider,
            http,
            api_key: credentials.api_key.expose_secret().clone(),
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn chat(&self, payload: &serde_json::Value) -> Result<BackendResponse, GatewayError> {
        let url = self.completions_url();
        debug!(provider = %self.provider, url = %url, "Dispatching chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|err| GatewayError::transport(self.provider, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_error_body(response).await;
            return Err(GatewayError::from_upstream_status(
                self.provider,
                status.as_u16(),
                message,
            ));
        }

        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err));

        Ok(BackendResponse {
            status,
            headers,
            body: Box::pin(body),
        })
    }

    fn provider(&self) -> ProviderId {
        self.provider
    }
}

/// Reads a bounded prefix of a failed response body for error reporting.
async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(mut text) => {
            if text.len() > ERROR_BODY_LIMIT {
                let mut end = ERROR_BODY_LIMIT;
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                text.truncate(end);
            }
            if text.is_empty() {
                "upstream returned an error with an empty body".to_string()
            } else {
                text
            }
        }
        Err(_) => "upstream error body could not be read".to_string(),
    }
}

/// Factory that pools one reqwest client per provider.
///
/// Connection pools are expensive to build and safe to share; only the
/// per-attempt key and base URL vary, and those live on the
/// [`HttpBackendClient`] wrapper.
pub struct HttpClientFactory {
    pools: DashMap<ProviderId, reqwest::Client>,
    connect_timeout: Duration,
}

impl HttpClientFactory {
    /// Create a factory with the given connect timeout.
    #[must_use]
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            pools: DashMap::new(),
            connect_timeout,
        }
    }

    fn pool_for(&self, provider: ProviderId) -> Result<reqwest::Client, GatewayError> {
        if let Some(existing) = self.pools.get(&provider) {
            return Ok(existing.clone());
        }

        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|err| {
                GatewayError::internal(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(self
            .pools
            .entry(provider)
            .or_insert(client)
            .value()
            .clone())
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl BackendClientFactory for HttpClientFactory {
    async fn client_for(
        &self,
        provider: ProviderId,
        credentials: &ProviderCredentials,
    ) -> Result<Arc<dyn BackendClient>, GatewayError> {
        let pool = self.pool_for(provider)?;
        Ok(Arc::new(HttpBackendClient::new(provider, pool, credentials)))
    }
}
