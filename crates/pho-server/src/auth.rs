//! Authorization delegate and the bundled API-key implementation.
//!
//! Authorization is an external concern: the gateway asks the delegate
//! for a caller identity and surfaces the delegate's error unchanged. A
//! separate bypass path, gated on a shared secret, skips the delegate
//! entirely for internal testing traffic.

use async_trait::async_trait;
use pho_core::{GatewayError, IdentityPayload};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Contract for resolving a caller's identity from a bearer token.
#[async_trait]
pub trait AuthDelegate: Send + Sync {
    /// Authorize the caller.
    ///
    /// The returned error is surfaced to the caller unchanged.
    async fn authorize(&self, bearer: Option<&str>) -> Result<IdentityPayload, GatewayError>;
}

/// Compare two secrets by SHA-256 digest, avoiding length leaks.
#[must_use]
pub fn secrets_match(presented: &str, expected: &SecretString) -> bool {
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.expose_secret().as_bytes());
    a == b
}

/// Bundled delegate validating against a static key list.
///
/// With no keys configured every caller is admitted anonymously, which
/// matches a gateway deployed behind an authenticating proxy.
pub struct StaticKeyAuth {
    keys: Vec<SecretString>,
}

impl StaticKeyAuth {
    /// Create a delegate over the configured key list.
    #[must_use]
    pub fn new(keys: Vec<SecretString>) -> Self {
        Self { keys }
    }

    /// Whether any keys are configured at all.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl AuthDelegate for StaticKeyAuth {
    async fn authorize(&self, bearer: Option<&str>) -> Result<IdentityPayload, GatewayError> {
        if self.is_open() {
            debug!("No API keys configured, admitting caller anonymously");
            return Ok(IdentityPayload::anonymous());
        }

        let token =
            bearer.ok_or_else(|| GatewayError::unauthorized("missing bearer token"))?;

        if self.keys.iter().any(|key| secrets_match(token, key)) {
            Ok(IdentityPayload::for_user("api-key"))
        } else {
            Err(GatewayError::unauthorized("invalid API key"))
        }
    }
}
