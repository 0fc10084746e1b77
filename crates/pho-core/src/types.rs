//! Provider identifiers and caller identity types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of backend providers the gateway can dispatch to.
///
/// Keeping this a tagged enum (rather than free-form strings) gives
/// compile-time exhaustiveness for remap and credential tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Groq LPU inference
    Groq,
    /// Cerebras inference
    Cerebras,
    /// Together AI
    Togetherai,
    /// Fireworks AI
    Fireworksai,
    /// Cloudflare Workers AI
    Cloudflare,
    /// Inception Labs (Mercury diffusion LLMs)
    Inceptionlabs,
    /// OpenAI direct
    Openai,
    /// Anthropic direct
    Anthropic,
    /// Google AI Studio direct
    Google,
    /// DeepSeek direct
    Deepseek,
    /// xAI direct
    Xai,
    /// Google Vertex AI direct
    Vertexai,
    /// Vercel AI Gateway, the unified multi-vendor relay
    Vercelaigateway,
}

impl ProviderId {
    /// All known providers, in no particular order.
    pub const ALL: [Self; 13] = [
        Self::Groq,
        Self::Cerebras,
        Self::Togetherai,
        Self::Fireworksai,
        Self::Cloudflare,
        Self::Inceptionlabs,
        Self::Openai,
        Self::Anthropic,
        Self::Google,
        Self::Deepseek,
        Self::Xai,
        Self::Vertexai,
        Self::Vercelaigateway,
    ];

    /// Stable lowercase identifier, as used on the wire and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Cerebras => "cerebras",
            Self::Togetherai => "togetherai",
            Self::Fireworksai => "fireworksai",
            Self::Cloudflare => "cloudflare",
            Self::Inceptionlabs => "inceptionlabs",
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Deepseek => "deepseek",
            Self::Xai => "xai",
            Self::Vertexai => "vertexai",
            Self::Vercelaigateway => "vercelaigateway",
        }
    }

    /// Environment variable conventionally holding this provider's API key.
    #[must_use]
    pub fn api_key_env(self) -> String {
        format!("{}_API_KEY", self.as_str().to_uppercase())
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Resolved caller identity produced by the authorization delegate.
///
/// The gateway never inspects this beyond passing it to the credential
/// resolver; the optional key/base-URL carry caller-scoped overrides.
#[derive(Debug, Clone, Default)]
pub struct IdentityPayload {
    /// Authenticated user identifier, if any
    pub user_id: Option<String>,
    /// Caller-supplied API key override for the target provider
    pub api_key: Option<SecretString>,
    /// Caller-supplied base URL override for the target provider
    pub base_url: Option<String>,
}

impl IdentityPayload {
    /// Identity used by the bypass path: no user, no overrides.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create an identity for a known user.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_roundtrips_through_str() {
        for provider in ProviderId::ALL {
            assert_eq!(provider.as_str().parse::<ProviderId>(), Ok(provider));
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!("nonsense".parse::<ProviderId>().is_err());
    }

    #[test]
    fn provider_serde_uses_lowercase() {
        let json = serde_json::to_string(&ProviderId::Vercelaigateway).unwrap();
        assert_eq!(json, "\"vercelaigateway\"");
        let back: ProviderId = serde_json::from_str("\"groq\"").unwrap();
        assert_eq!(back, ProviderId::Groq);
    }

    #[test]
    fn api_key_env_names() {
        assert_eq!(ProviderId::Groq.api_key_env(), "GROQ_API_KEY");
        assert_eq!(
            ProviderId::Vercelaigateway.api_key_env(),
            "VERCELAIGATEWAY_API_KEY"
        );
    }
}
