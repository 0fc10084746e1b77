//! Sequential failover loop.
//!
//! Candidates are attempted strictly in list order, one at a time. The
//! first success short-circuits the loop and its body stream is handed
//! through untouched. Every failure is classified and logged, then the
//! loop advances regardless of classification; only exhaustion of the
//! whole list produces a failure response, built from the last recorded
//! error.

use pho_core::{
    ChatRequest, FailureResponse, GatewayError, GatewayResponse, IdentityPayload, SuccessResponse,
};
use pho_providers::{BackendClientFactory, CredentialResolver};
use pho_routing::ProviderCandidate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::sanitize::sanitize_payload;

/// Per-request failover driver.
///
/// Holds no mutable state; attempt bookkeeping lives on the stack of one
/// [`execute`](FailoverOrchestrator::execute) call, so a single instance is
/// shared across all in-flight requests.
pub struct FailoverOrchestrator {
    credentials: Arc<dyn CredentialResolver>,
    clients: Arc<dyn BackendClientFactory>,
}

impl FailoverOrchestrator {
    /// Create an orchestrator over the given collaborators.
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialResolver>,
        clients: Arc<dyn BackendClientFactory>,
    ) -> Self {
        Self {
            credentials,
            clients,
        }
    }

    /// Run the failover loop for one request.
    ///
    /// An empty candidate list is a configuration fault and yields an
    /// internal error without any attempt being made.
    pub async fn execute(
        &self,
        request: &ChatRequest,
        identity: &IdentityPayload,
        candidates: &[ProviderCandidate],
    ) -> GatewayResponse {
        if candidates.is_empty() {
            return self.failure(
                request,
                GatewayError::internal(format!(
                    "no provider configured for model '{}'",
                    request.model
                )),
            );
        }

        let mut last_error: Option<GatewayError> = None;

        for (attempt, candidate) in candidates.iter().enumerate() {
            match self.try_candidate(request, identity, candidate).await {
                Ok(success) => {
                    info!(
                        provider = %candidate.provider,
                        model = %candidate.model_id,
                        attempt = attempt + 1,
                        of = candidates.len(),
                        "Attempt succeeded"
                    );
                    return GatewayResponse::Success(success);
                }
                Err(error) => {
                    warn!(
                        provider = %candidate.provider,
                        model = %candidate.model_id,
                        attempt = attempt + 1,
                        of = candidates.len(),
                        kind = %error.kind(),
                        retryable = error.is_retryable(),
                        error = %error,
                        "Attempt failed, advancing to next candidate"
                    );
                    last_error = Some(error);
                }
            }
        }

        // The list was non-empty, so at least one error was recorded.
        let last = last_error
            .unwrap_or_else(|| GatewayError::internal("failover exhausted without a cause"));
        self.failure(request, last.into_exhausted(&request.model))
    }

    async fn try_candidate(
        &self,
        request: &ChatRequest,
        identity: &IdentityPayload,
        candidate: &ProviderCandidate,
    ) -> Result<SuccessResponse, GatewayError> {
        let credentials = self
            .credentials
            .resolve(candidate.provider, identity)
            .await?;
        let client = self
            .clients
            .client_for(candidate.provider, &credentials)
            .await?;

        let mut payload = request.wire_payload(&candidate.model_id);
        sanitize_payload(candidate, &mut payload);

        let backend = client.chat(&payload).await?;

        Ok(SuccessResponse {
            provider: candidate.provider,
            model_id: candidate.model_id.clone(),
            status: backend.status,
            headers: backend.headers,
            body: backend.body,
        })
    }

    fn failure(&self, request: &ChatRequest, error: GatewayError) -> GatewayResponse {
        GatewayResponse::Failure(FailureResponse {
            error,
            requested_model: request.model.clone(),
            requested_provider: request.provider,
        })
    }
}
