//! Gateway error taxonomy.
//!
//! Every upstream failure is classified into one of a small set of kinds.
//! Classification feeds logging and the final failure payload; the failover
//! loop itself advances on any per-attempt error regardless of kind.

use crate::types::ProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenience alias for gateway results.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Coarse error classification, stable across provider vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller failed authorization
    Unauthorized,
    /// Upstream returned HTTP 429
    RateLimited,
    /// Provider-side business error: HTTP 500 or a credential rejection
    ProviderBizError,
    /// Connection reset or other transport-level failure
    Transport,
    /// Gateway-side failure (misconfiguration, exhaustion without cause)
    InternalServerError,
    /// Any other upstream error
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unauthorized => "Unauthorized",
            Self::RateLimited => "RateLimited",
            Self::ProviderBizError => "ProviderBizError",
            Self::Transport => "Transport",
            Self::InternalServerError => "InternalServerError",
            Self::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Gateway error carrying classification, origin, and message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Caller is not authorized to issue the request
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Human-readable reason
        message: String,
    },

    /// Upstream rate limit (HTTP 429)
    #[error("{provider} rate limited: {message}")]
    RateLimited {
        /// Provider that rejected the attempt
        provider: ProviderId,
        /// Upstream error text
        message: String,
    },

    /// Upstream provider-side error (HTTP 500 or a credential rejection)
    #[error("{provider} provider error (HTTP {status}): {message}")]
    ProviderBizError {
        /// Provider that failed
        provider: ProviderId,
        /// Upstream HTTP status
        status: u16,
        /// Upstream error text
        message: String,
    },

    /// Transport-level failure before or during the upstream exchange
    #[error("{provider} transport failure: {message}")]
    Transport {
        /// Provider the gateway was talking to
        provider: ProviderId,
        /// Failure description
        message: String,
    },

    /// Gateway-internal failure
    #[error("internal error: {message}")]
    Internal {
        /// Failure description
        message: String,
    },

    /// Any other upstream error
    #[error("{provider} error{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Other {
        /// Provider that failed
        provider: ProviderId,
        /// Upstream HTTP status, when one was received
        status: Option<u16>,
        /// Upstream error text
        message: String,
    },
}

impl GatewayError {
    /// Build an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Build an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Classify a non-success upstream HTTP response.
    ///
    /// `500 -> ProviderBizError`, `429 -> RateLimited`, everything else
    /// `Other`. Upstream credential rejections (401/403 or a key-shaped
    /// error text) also classify as `ProviderBizError`: the gateway's
    /// provider key is at fault, and the caller must never be told to
    /// supply their own. Transport failures never reach this path; they
    /// are built via [`GatewayError::transport`].
    #[must_use]
    pub fn from_upstream_status(
        provider: ProviderId,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        match status {
            500 | 401 | 403 => Self::ProviderBizError {
                provider,
                status,
                message,
            },
            429 => Self::RateLimited { provider, message },
            _ if is_credential_message(&message) => Self::ProviderBizError {
                provider,
                status,
                message,
            },
            _ => Self::Other {
                provider,
                status: Some(status),
                message,
            },
        }
    }

    /// Build a transport-level error (connection reset, timeout, DNS, TLS).
    #[must_use]
    pub fn transport(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            message: message.into(),
        }
    }

    /// The classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::ProviderBizError { .. } => ErrorKind::ProviderBizError,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Internal { .. } => ErrorKind::InternalServerError,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Whether the failure is considered retryable.
    ///
    /// Used for logging and telemetry only; the failover loop advances to
    /// the next candidate on every per-attempt failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimited | ErrorKind::ProviderBizError | ErrorKind::Transport
        )
    }

    /// The provider an upstream error originated from, if any.
    #[must_use]
    pub const fn provider(&self) -> Option<ProviderId> {
        match self {
            Self::RateLimited { provider, .. }
            | Self::ProviderBizError { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Other { provider, .. } => Some(*provider),
            Self::Unauthorized { .. } | Self::Internal { .. } => None,
        }
    }

    /// HTTP status to surface for this error at the gateway boundary.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Unauthorized => 401,
            ErrorKind::RateLimited => 429,
            ErrorKind::ProviderBizError | ErrorKind::Transport => 502,
            ErrorKind::InternalServerError | ErrorKind::Other => 500,
        }
    }

    /// Rebuild this error with a message naming the exhausted model.
    ///
    /// Applied once the failover loop runs out of candidates: the kind of
    /// the last recorded error is preserved, the message is rewritten to
    /// name the requested model and the last underlying error text.
    #[must_use]
    pub fn into_exhausted(self, model: &str) -> Self {
        let message = format!(
            "all prioritized providers failed for model '{model}'; last error: {self}"
        );
        match self {
            Self::Unauthorized { .. } => Self::Unauthorized { message },
            Self::RateLimited { provider, .. } => Self::RateLimited { provider, message },
            Self::ProviderBizError {
                provider, status, ..
            } => Self::ProviderBizError {
                provider,
                status,
                message,
            },
            Self::Transport { provider, .. } => Self::Transport { provider, message },
            Self::Internal { .. } => Self::Internal { message },
            Self::Other {
                provider, status, ..
            } => Self::Other {
                provider,
                status,
                message,
            },
        }
    }
}

/// Whether an upstream error text looks like a provider key rejection.
fn is_credential_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("api key") || lower.contains("api_key") || lower.contains("apikey")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        let e = GatewayError::from_upstream_status(ProviderId::Groq, 500, "boom");
        assert_eq!(e.kind(), ErrorKind::ProviderBizError);
        assert!(e.is_retryable());

        let e = GatewayError::from_upstream_status(ProviderId::Groq, 429, "slow down");
        assert_eq!(e.kind(), ErrorKind::RateLimited);
        assert!(e.is_retryable());

        let e = GatewayError::transport(ProviderId::Cerebras, "connection reset");
        assert_eq!(e.kind(), ErrorKind::Transport);
        assert!(e.is_retryable());

        let e = GatewayError::from_upstream_status(ProviderId::Groq, 404, "no such model");
        assert_eq!(e.kind(), ErrorKind::Other);
        assert!(!e.is_retryable());
    }

    #[test]
    fn upstream_credential_rejections_are_provider_faults() {
        // Status-shaped: upstream 401/403 is our provider key failing, not
        // a caller authorization problem.
        let e = GatewayError::from_upstream_status(
            ProviderId::Groq,
            401,
            r#"{"error":{"message":"Invalid API key provided"}}"#,
        );
        assert_eq!(e.kind(), ErrorKind::ProviderBizError);
        assert_eq!(e.http_status(), 502);

        let e = GatewayError::from_upstream_status(ProviderId::Cerebras, 403, "forbidden");
        assert_eq!(e.kind(), ErrorKind::ProviderBizError);

        // Message-shaped: some vendors return key errors on other statuses.
        let e = GatewayError::from_upstream_status(
            ProviderId::Groq,
            400,
            "missing api_key parameter",
        );
        assert_eq!(e.kind(), ErrorKind::ProviderBizError);

        // Plain bad requests still classify as Other.
        let e = GatewayError::from_upstream_status(ProviderId::Groq, 400, "bad payload");
        assert_eq!(e.kind(), ErrorKind::Other);
    }

    #[test]
    fn exhausted_preserves_kind_and_names_model() {
        let last = GatewayError::from_upstream_status(ProviderId::Cerebras, 429, "quota");
        let out = last.into_exhausted("pho-fast");
        assert_eq!(out.kind(), ErrorKind::RateLimited);
        assert!(out.to_string().contains("pho-fast"));
        assert!(out.to_string().contains("quota"));
    }

    #[test]
    fn http_status_mapping() {
        assert_eq!(GatewayError::unauthorized("no").http_status(), 401);
        assert_eq!(
            GatewayError::from_upstream_status(ProviderId::Groq, 429, "x").http_status(),
            429
        );
        assert_eq!(
            GatewayError::transport(ProviderId::Groq, "x").http_status(),
            502
        );
        assert_eq!(GatewayError::internal("x").http_status(), 500);
    }
}
