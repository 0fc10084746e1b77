//! Shared application state.

use arc_swap::ArcSwap;
use pho_config::GatewayConfig;
use pho_failover::FailoverOrchestrator;
use pho_providers::{
    BackendClientFactory, CredentialResolver, EnvCredentialResolver, HttpClientFactory,
};
use pho_routing::{ModelRegistry, ProviderRemapper};
use std::sync::Arc;
use tracing::info;

use crate::auth::{AuthDelegate, StaticKeyAuth};

/// Immutable-per-request state shared across all handlers.
///
/// The registry sits behind an atomic swap so a config reload replaces
/// the whole table without touching in-flight requests.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<GatewayConfig>,
    /// Logical model table, swapped wholesale on reload
    pub registry: Arc<ArcSwap<ModelRegistry>>,
    /// Provider remap tables
    pub remapper: Arc<ProviderRemapper>,
    /// Failover driver
    pub orchestrator: Arc<FailoverOrchestrator>,
    /// Authorization delegate
    pub auth: Arc<dyn AuthDelegate>,
}

impl AppState {
    /// Start building state from a configuration.
    #[must_use]
    pub fn builder(config: GatewayConfig) -> AppStateBuilder {
        AppStateBuilder {
            config,
            credentials: None,
            clients: None,
            auth: None,
        }
    }

    /// Replace the routing table from a freshly loaded configuration.
    pub fn reload_registry(&self, config: &GatewayConfig) {
        let registry = ModelRegistry::from_config(config);
        info!(models = registry.len(), "Swapping model registry");
        self.registry.store(Arc::new(registry));
    }
}

/// Builder for [`AppState`]; collaborators default to the production
/// implementations and can be swapped out in tests.
pub struct AppStateBuilder {
    config: GatewayConfig,
    credentials: Option<Arc<dyn CredentialResolver>>,
    clients: Option<Arc<dyn BackendClientFactory>>,
    auth: Option<Arc<dyn AuthDelegate>>,
}

impl AppStateBuilder {
    /// Override the credential resolver.
    #[must_use]
    pub fn credentials(mut self, credentials: Arc<dyn CredentialResolver>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the backend client factory.
    #[must_use]
    pub fn clients(mut self, clients: Arc<dyn BackendClientFactory>) -> Self {
        self.clients = Some(clients);
        self
    }

    /// Override the authorization delegate.
    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AuthDelegate>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Assemble the state.
    #[must_use]
    pub fn build(self) -> AppState {
        let registry = ModelRegistry::from_config(&self.config);
        let remapper = ProviderRemapper::from_config(&self.config);

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(EnvCredentialResolver::from_config(&self.config)));
        let clients = self
            .clients
            .unwrap_or_else(|| Arc::new(HttpClientFactory::default()));
        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(StaticKeyAuth::new(self.config.api_keys.clone())));

        AppState {
            config: Arc::new(self.config),
            registry: Arc::new(ArcSwap::from_pointee(registry)),
            remapper: Arc::new(remapper),
            orchestrator: Arc::new(FailoverOrchestrator::new(credentials, clients)),
            auth,
        }
    }
}
