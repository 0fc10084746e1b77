//! Credential resolution.
//!
//! Given a provider and the caller's resolved identity, produce the
//! parameters needed to construct a backend client. Credentials are never
//! cached by the gateway beyond a single attempt; pooled rotation is the
//! resolver's own concern.

use async_trait::async_trait;
use pho_config::GatewayConfig;
use pho_core::{GatewayError, IdentityPayload, ProviderId};
use secrecy::SecretString;
use std::collections::HashMap;

/// Connection parameters for one backend provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    /// API key presented to the backend
    pub api_key: SecretString,
    /// Base URL of the provider's OpenAI-compatible endpoint
    pub base_url: String,
}

/// External collaborator contract: resolve connection parameters for a
/// provider on behalf of a caller.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Resolve credentials for `provider`.
    ///
    /// A resolution failure is an attempt failure, not a gateway crash.
    async fn resolve(
        &self,
        provider: ProviderId,
        identity: &IdentityPayload,
    ) -> Result<ProviderCredentials, GatewayError>;
}

/// Default OpenAI-compatible endpoint for each provider.
#[must_use]
pub fn default_base_url(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Groq => "https://api.groq.com/openai/v1",
        ProviderId::Cerebras => "https://api.cerebras.ai/v1",
        ProviderId::Togetherai => "https://api.together.xyz/v1",
        ProviderId::Fireworksai => "https://api.fireworks.ai/inference/v1",
        ProviderId::Cloudflare => "https://api.cloudflare.com/client/v4/accounts/ai/v1",
        ProviderId::Inceptionlabs => "https://api.inceptionlabs.ai/v1",
        ProviderId::Openai => "https://api.openai.com/v1",
        ProviderId::Anthropic => "https://api.anthropic.com/v1",
        ProviderId::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
        ProviderId::Deepseek => "https://api.deepseek.com/v1",
        ProviderId::Xai => "https://api.x.ai/v1",
        ProviderId::Vertexai => "https://aiplatform.googleapis.com/v1",
        ProviderId::Vercelaigateway => "https://ai-gateway.vercel.sh/v1",
    }
}

/// Resolver backed by configuration and process environment.
///
/// Lookup order for the API key: caller identity override, inline config
/// key, configured env var, conventional `{PROVIDER}_API_KEY` env var.
/// Base URL: caller identity override, config override, built-in default.
#[derive(Debug, Clone)]
pub struct EnvCredentialResolver {
    inline_keys: HashMap<ProviderId, SecretString>,
    key_envs: HashMap<ProviderId, String>,
    base_urls: HashMap<ProviderId, String>,
}

impl EnvCredentialResolver {
    /// Build the resolver from provider settings in the configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut inline_keys = HashMap::new();
        let mut key_envs = HashMap::new();
        let mut base_urls = HashMap::new();

        for settings in &config.providers {
            if !settings.enabled {
                continue;
            }
            if let Some(key) = &settings.api_key {
                inline_keys.insert(settings.id, key.clone());
            }
            if let Some(var) = &settings.api_key_env {
                key_envs.insert(settings.id, var.clone());
            }
            if let Some(url) = &settings.base_url {
                base_urls.insert(settings.id, url.clone());
            }
        }

        Self {
            inline_keys,
            key_envs,
            base_urls,
        }
    }

    fn api_key(
        &self,
        provider: ProviderId,
        identity: &IdentityPayload,
    ) -> Result<SecretString, GatewayError> {
        if let Some(key) = &identity.api_key {
            return Ok(key.clone());
        }
        if let Some(key) = self.inline_keys.get(&provider) {
            return Ok(key.clone());
        }

        let var = self
            .key_envs
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| provider.api_key_env());

        std::env::var(&var)
            .map(SecretString::new)
            .map_err(|_| GatewayError::internal(format!("no API key configured for {provider}")))
    }

    fn base_url(&self, provider: ProviderId, identity: &IdentityPayload) -> String {
        identity
            .base_url
            .clone()
            .or_else(|| self.base_urls.get(&provider).cloned())
            .unwrap_or_else(|| default_base_url(provider).to_string())
    }
}

#[async_trait]
impl CredentialResolver for EnvCredentialResolver {
    async fn resolve(
        &self,
        provider: ProviderId,
        identity: &IdentityPayload,
    ) -> Result<ProviderCredentials, GatewayError> {
        Ok(ProviderCredentials {
            api_key: self.api_key(provider, identity)?,
            base_url: self.base_url(provider, identity),
        })
    }
}
