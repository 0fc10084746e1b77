//! Logical model registry.

use pho_config::GatewayConfig;
use pho_core::ProviderId;
use std::collections::HashMap;

/// One concrete backend capable of serving a logical request.
///
/// Carries no priority of its own; position in the owning list is the
/// attempt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCandidate {
    /// Backend provider
    pub provider: ProviderId,
    /// Concrete model id on that provider
    pub model_id: String,
}

impl ProviderCandidate {
    /// Create a candidate.
    #[must_use]
    pub fn new(provider: ProviderId, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }
}

/// Immutable mapping from logical model ids to ordered candidate lists.
///
/// Built once from configuration and shared read-only across requests.
/// Hot reload replaces the whole registry behind an atomic handle; entries
/// are never mutated in place while in use.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: HashMap<String, Vec<ProviderCandidate>>,
    default_provider: ProviderId,
}

impl ModelRegistry {
    /// Build the registry from configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let models = config
            .logical_models
            .iter()
            .map(|m| {
                let candidates = m
                    .providers
                    .iter()
                    .map(|c| ProviderCandidate::new(c.provider, c.model_id.clone()))
                    .collect();
                (m.id.clone(), candidates)
            })
            .collect();

        Self {
            models,
            default_provider: config.default_provider,
        }
    }

    /// Whether `model_id` is a logical identifier.
    #[must_use]
    pub fn is_logical(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    /// The first configured candidate for a logical model, if any.
    #[must_use]
    pub fn primary(&self, model_id: &str) -> Option<&ProviderCandidate> {
        self.models.get(model_id).and_then(|list| list.first())
    }

    /// Resolve a model id to its prioritized candidate list.
    ///
    /// Logical ids expand to their full configured list; the hint is
    /// ignored for them since a logical name already encodes its own
    /// vendor set. Anything else is treated as a concrete backend model id
    /// and yields a single candidate on the hinted (or default) provider.
    ///
    /// Never errors: unknown ids are not a failure here, they defer to
    /// actual execution.
    #[must_use]
    pub fn resolve(&self, model_id: &str, provider_hint: Option<ProviderId>) -> Vec<ProviderCandidate> {
        if let Some(candidates) = self.models.get(model_id) {
            return candidates.clone();
        }

        vec![ProviderCandidate::new(
            provider_hint.unwrap_or(self.default_provider),
            model_id,
        )]
    }

    /// Number of logical models in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
