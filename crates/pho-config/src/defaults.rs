//! Built-in configuration: the shipped logical model table, sunset-model
//! redirects, and the disabled-provider tables.
//!
//! A config file replaces these wholesale; there is no merging of the
//! built-in table with a user-supplied one.

use crate::{CandidateConfig, GatewayConfig, LogicalModelConfig, ServerConfig};
use pho_core::ProviderId;
use std::collections::BTreeMap;
use std::time::Duration;

fn candidate(provider: ProviderId, model_id: &str) -> CandidateConfig {
    CandidateConfig {
        provider,
        model_id: model_id.to_string(),
    }
}

fn logical(id: &str, providers: Vec<CandidateConfig>) -> LogicalModelConfig {
    LogicalModelConfig {
        id: id.to_string(),
        providers,
    }
}

/// The shipped logical model table.
///
/// Order inside each list is the failover priority; the last entry is
/// usually the relay, which is the slowest but most reliable path.
fn logical_models() -> Vec<LogicalModelConfig> {
    use ProviderId::{Cerebras, Cloudflare, Groq, Inceptionlabs, Togetherai, Vercelaigateway};

    vec![
        logical(
            "gemma-3-27b-it",
            vec![
                candidate(Groq, "gemma-3-27b-it"),
                candidate(Vercelaigateway, "google/gemini-2.0-flash"),
            ],
        ),
        logical(
            "kimi-k2",
            vec![
                candidate(Togetherai, "moonshotai/Kimi-K2-Instruct"),
                candidate(Vercelaigateway, "google/gemini-2.5-flash"),
            ],
        ),
        logical(
            "llama-3.1-8b-instant",
            vec![
                candidate(Groq, "llama-3.1-8b-instant"),
                candidate(Cloudflare, "@cf/meta/llama-3.1-8b-instruct"),
                candidate(Vercelaigateway, "google/gemini-2.0-flash"),
            ],
        ),
        logical(
            "llama-4-scout-17b",
            vec![
                candidate(Groq, "meta-llama/llama-4-scout-17b-16e-instruct"),
                candidate(Vercelaigateway, "google/gemini-2.0-flash"),
            ],
        ),
        logical(
            "mercury-coder-small-2-2",
            vec![
                candidate(Inceptionlabs, "mercury-2"),
                candidate(Vercelaigateway, "google/gemini-2.0-flash"),
            ],
        ),
        logical(
            "pho-fast",
            vec![
                candidate(Groq, "llama-3.1-8b-instant"),
                candidate(Cerebras, "llama3.1-8b"),
                candidate(Vercelaigateway, "google/gemini-2.0-flash"),
            ],
        ),
        logical(
            "pho-pro",
            vec![
                candidate(Groq, "llama-3.3-70b-versatile"),
                candidate(Vercelaigateway, "google/gemini-2.5-flash"),
            ],
        ),
        logical(
            "pho-smart",
            vec![
                candidate(Cerebras, "llama3.1-70b"),
                candidate(Groq, "llama-3.3-70b-versatile"),
                candidate(Vercelaigateway, "google/gemini-2.5-flash"),
            ],
        ),
        logical(
            "pho-vision",
            vec![candidate(Vercelaigateway, "google/gemini-2.5-flash")],
        ),
    ]
}

/// Redirects for sunset models, keeping retired ids working transparently.
fn model_redirects() -> BTreeMap<String, String> {
    const SONNET_4: &str = "claude-sonnet-4-20250514";
    [
        ("claude-3-5-sonnet-20240620", SONNET_4),
        ("claude-3-5-sonnet-20241022", SONNET_4),
        ("claude-3-7-sonnet-20250219", SONNET_4),
        ("claude-3-7-sonnet-latest", SONNET_4),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

pub(crate) fn default_config() -> GatewayConfig {
    use ProviderId::{Anthropic, Deepseek, Google, Openai, Vertexai, Xai};

    GatewayConfig {
        server: ServerConfig::default(),
        default_provider: Openai,
        relay_provider: ProviderId::Vercelaigateway,
        request_timeout: Duration::from_secs(300),
        bypass_token: None,
        api_keys: Vec::new(),
        logical_models: logical_models(),
        model_redirects: model_redirects(),
        // Providers without direct API keys; all traffic goes via the relay.
        disabled_providers: vec![Google, Openai, Anthropic, Deepseek, Xai, Vertexai],
        // Vertex AI models live under the `google/` namespace on the relay.
        vendor_namespaces: BTreeMap::from([(Vertexai, "google".to_string())]),
        providers: Vec::new(),
    }
}
