//! # Pho Config
//!
//! Configuration management for the Pho inference gateway.
//!
//! The gateway's only owned state layout is configuration: the logical
//! model table, the disabled-provider/vendor-namespace tables, provider
//! connection settings, and the server/auth surface. Everything is loaded
//! once at process start; hot reload replaces the derived routing table as
//! a whole, never entry by entry.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod defaults;
mod load;

pub use load::{load_config, ConfigError, CONFIG_ENV};

use pho_core::ProviderId;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    #[validate(length(min = 1))]
    pub host: String,
    /// Bind port
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// One candidate entry in a logical model's ordered provider list.
///
/// Serialize is required because the validation derive attaches the
/// offending table as an error parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Backend provider
    pub provider: ProviderId,
    /// Concrete model id on that provider
    pub model_id: String,
}

/// A logical model: a stable product-facing id expanding to an ordered
/// list of equivalent (provider, model) pairs. Index 0 is tried first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalModelConfig {
    /// Logical identifier (e.g. `pho-fast`)
    pub id: String,
    /// Ordered candidate list; must be non-empty
    pub providers: Vec<CandidateConfig>,
}

/// Connection settings for one backend provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// Provider this entry configures
    pub id: ProviderId,
    /// Whether the provider may be used at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Inline API key (prefer `api_key_env` outside of tests)
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Base URL override for the provider's OpenAI-compatible endpoint
    #[serde(default)]
    pub base_url: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[validate(nested)]
    pub server: ServerConfig,

    /// Provider assumed for concrete model ids with no hint
    pub default_provider: ProviderId,

    /// The unified multi-vendor relay that disabled providers route through
    pub relay_provider: ProviderId,

    /// Overall deadline for one orchestration run (not per attempt)
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Shared secret for the internal-testing bypass path.
    ///
    /// Must never ship with a default value; it is only read from config
    /// or the `PHO_GATEWAY_LABS_TOKEN` environment variable.
    #[serde(default)]
    pub bypass_token: Option<SecretString>,

    /// Caller API keys accepted by the bundled authorization delegate
    #[serde(default)]
    pub api_keys: Vec<SecretString>,

    /// Logical model table
    #[validate(custom(function = "validate_logical_models"))]
    pub logical_models: Vec<LogicalModelConfig>,

    /// Sunset-model redirects, applied before the disabled-provider remap
    pub model_redirects: BTreeMap<String, String>,

    /// Providers disabled as direct integrations
    pub disabled_providers: Vec<ProviderId>,

    /// Vendor-namespace aliases for the relay prefix.
    ///
    /// A provider absent from this table uses its own id as namespace.
    pub vendor_namespaces: BTreeMap<ProviderId, String>,

    /// Per-provider connection settings
    pub providers: Vec<ProviderSettings>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        defaults::default_config()
    }
}

impl GatewayConfig {
    /// Whether a provider is disabled as a direct integration.
    #[must_use]
    pub fn is_disabled(&self, provider: ProviderId) -> bool {
        self.disabled_providers.contains(&provider)
    }

    /// The relay vendor namespace for a provider.
    #[must_use]
    pub fn vendor_namespace(&self, provider: ProviderId) -> &str {
        self.vendor_namespaces
            .get(&provider)
            .map_or_else(|| provider.as_str(), String::as_str)
    }

    /// Settings for a specific provider, if configured.
    #[must_use]
    pub fn provider_settings(&self, provider: ProviderId) -> Option<&ProviderSettings> {
        self.providers
            .iter()
            .find(|p| p.id == provider && p.enabled)
    }
}

fn validate_logical_models(models: &[LogicalModelConfig]) -> Result<(), ValidationError> {
    let mut seen = std::collections::BTreeSet::new();
    for model in models {
        if model.providers.is_empty() {
            return Err(ValidationError::new("empty_candidate_list"));
        }
        if !seen.insert(model.id.as_str()) {
            return Err(ValidationError::new("duplicate_logical_model"));
        }
    }
    Ok(())
}
