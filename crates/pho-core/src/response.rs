//! Attempt and gateway response types.
//!
//! A successful attempt hands back the backend's status, headers, and an
//! opaque byte stream. The stream is owned by the orchestrator only until
//! the overall response is returned; after that the transport layer pulls
//! it until the backend finishes or the caller disconnects.

use crate::error::GatewayError;
use crate::types::ProviderId;
use bytes::Bytes;
use futures::Stream;
use http::{HeaderMap, StatusCode};
use std::fmt;
use std::pin::Pin;

/// Response header naming the provider that actually served the request.
pub const PROVIDER_HEADER: &str = "x-pho-provider";

/// Response header naming the concrete model id actually used.
pub const MODEL_HEADER: &str = "x-pho-model-id";

/// Opaque streaming response body.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static>>;

/// One backend's raw response to a single attempt.
pub struct BackendResponse {
    /// Upstream HTTP status
    pub status: StatusCode,
    /// Upstream response headers, passed through unmodified
    pub headers: HeaderMap,
    /// Response body stream
    pub body: BodyStream,
}

impl fmt::Debug for BackendResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Result of one execution attempt against one candidate.
///
/// Exists only for the duration of a single orchestration call; never
/// persisted.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The backend answered with a success status
    Success(BackendResponse),
    /// The attempt failed, with a classified error
    Failure(GatewayError),
}

impl AttemptOutcome {
    /// Whether this attempt succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Successful gateway response: the winning attempt's body plus the two
/// injected diagnostic headers.
pub struct SuccessResponse {
    /// Provider that served the request
    pub provider: ProviderId,
    /// Concrete model id actually used
    pub model_id: String,
    /// Upstream HTTP status
    pub status: StatusCode,
    /// Upstream response headers
    pub headers: HeaderMap,
    /// Response body stream, handed off to the transport layer
    pub body: BodyStream,
}

impl SuccessResponse {
    /// The gateway-injected diagnostic headers, in insertion order.
    #[must_use]
    pub fn gateway_headers(&self) -> Vec<(String, String)> {
        vec![
            (PROVIDER_HEADER.to_string(), self.provider.to_string()),
            (MODEL_HEADER.to_string(), self.model_id.clone()),
        ]
    }
}

impl fmt::Debug for SuccessResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuccessResponse")
            .field("provider", &self.provider)
            .field("model_id", &self.model_id)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Aggregated failure after every candidate was exhausted (or none existed).
#[derive(Debug)]
pub struct FailureResponse {
    /// The classified error, built from the last recorded attempt failure
    pub error: GatewayError,
    /// Model the caller originally requested, for diagnostics
    pub requested_model: String,
    /// Provider the caller originally hinted at, for diagnostics
    pub requested_provider: Option<ProviderId>,
}

/// The orchestrator's overall verdict for one request.
///
/// Never a hybrid: once a success's bytes start flowing no error can be
/// substituted, and a failure carries no partial body.
#[derive(Debug)]
pub enum GatewayResponse {
    /// First successful attempt, streamed through
    Success(SuccessResponse),
    /// All candidates failed
    Failure(FailureResponse),
}

impl GatewayResponse {
    /// Whether the orchestration succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn empty_body() -> BodyStream {
        Box::pin(stream::empty())
    }

    #[test]
    fn gateway_headers_name_provider_and_model() {
        let success = SuccessResponse {
            provider: ProviderId::Cerebras,
            model_id: "llama3.1-8b".to_string(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: empty_body(),
        };

        let headers = success.gateway_headers();
        assert_eq!(
            headers,
            vec![
                ("x-pho-provider".to_string(), "cerebras".to_string()),
                ("x-pho-model-id".to_string(), "llama3.1-8b".to_string()),
            ]
        );
    }

    #[test]
    fn outcome_success_flag() {
        let ok = AttemptOutcome::Success(BackendResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: empty_body(),
        });
        assert!(ok.is_success());

        let err = AttemptOutcome::Failure(GatewayError::internal("x"));
        assert!(!err.is_success());
    }
}
