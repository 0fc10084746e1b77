//! Provider remapping.
//!
//! Rewrites a (provider, model) pair before candidate resolution:
//!
//! 1. Logical model ids route to their primary candidate's provider so
//!    downstream credential resolution picks the right key. The model id
//!    is kept as the logical name so the registry can still expand it.
//! 2. Sunset model ids redirect to their configured successor.
//! 3. Providers disabled as direct integrations redirect to the unified
//!    relay, with the model id prefixed by the vendor namespace the relay
//!    expects.

use crate::registry::ModelRegistry;
use pho_config::GatewayConfig;
use pho_core::ProviderId;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Remap tables, built once from configuration.
#[derive(Debug, Clone)]
pub struct ProviderRemapper {
    disabled: HashSet<ProviderId>,
    relay: ProviderId,
    namespaces: BTreeMap<ProviderId, String>,
    redirects: BTreeMap<String, String>,
}

impl ProviderRemapper {
    /// Build the remapper from configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            disabled: config.disabled_providers.iter().copied().collect(),
            relay: config.relay_provider,
            namespaces: config.vendor_namespaces.clone(),
            redirects: config.model_redirects.clone(),
        }
    }

    /// The relay vendor namespace for a provider.
    fn namespace(&self, provider: ProviderId) -> &str {
        self.namespaces
            .get(&provider)
            .map_or_else(|| provider.as_str(), String::as_str)
    }

    /// Rewrite a (provider, model) pair.
    ///
    /// Pure and idempotent: callers may apply it defensively more than
    /// once and get the same result.
    #[must_use]
    pub fn remap(
        &self,
        registry: &ModelRegistry,
        provider: ProviderId,
        model_id: &str,
    ) -> (ProviderId, String) {
        // Logical models route to their primary provider for credential
        // resolution; the id stays logical for later expansion.
        if let Some(primary) = registry.primary(model_id) {
            return (primary.provider, model_id.to_string());
        }

        // Sunset model redirect.
        let resolved = self
            .redirects
            .get(model_id)
            .map_or(model_id, String::as_str);
        if resolved != model_id {
            debug!(from = %model_id, to = %resolved, "Redirecting sunset model");
        }

        // Disabled direct integrations go through the relay, which expects
        // vendor-prefixed model ids (gpt-4o -> openai/gpt-4o).
        if self.disabled.contains(&provider) {
            let namespaced = if resolved.contains('/') {
                resolved.to_string()
            } else {
                format!("{}/{}", self.namespace(provider), resolved)
            };
            return (self.relay, namespaced);
        }

        (provider, resolved.to_string())
    }
}
