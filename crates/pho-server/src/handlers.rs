//! HTTP request handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use pho_core::{ChatRequest, GatewayResponse, IdentityPayload, SuccessResponse};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    auth::secrets_match,
    error::ApiError,
    extractors::{BearerToken, JsonBody, RequestId},
    state::AppState,
};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
    /// Logical models currently routable
    pub models: usize,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        models: state.registry.load().len(),
    })
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}

/// Gateway chat entry point.
///
/// Resolves identity, remaps the requested (provider, model) pair,
/// expands it to a prioritized candidate list, and runs the failover
/// loop under the configured overall deadline. A winning attempt's body
/// streams through with the diagnostic headers attached.
#[instrument(skip(state, body), fields(model = %body.model))]
pub async fn gateway_chat(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    BearerToken(bearer): BearerToken,
    JsonBody(body): JsonBody<ChatRequest>,
) -> Result<Response, ApiError> {
    let identity = resolve_identity(&state, bearer.as_deref()).await?;

    let registry = state.registry.load_full();
    let hint = body.provider.unwrap_or(state.config.default_provider);
    let (active_provider, active_model) = state.remapper.remap(&registry, hint, &body.model);
    let candidates = registry.resolve(&active_model, Some(active_provider));

    debug!(
        request_id = %request_id,
        requested_model = %body.model,
        hint = %hint,
        active_provider = %active_provider,
        active_model = %active_model,
        candidates = candidates.len(),
        streaming = body.wants_stream(),
        "Dispatching chat request"
    );

    let outcome = tokio::time::timeout(
        state.config.request_timeout,
        state.orchestrator.execute(&body, &identity, &candidates),
    )
    .await
    .map_err(|_| {
        ApiError::gateway_timeout(format!(
            "request exceeded the {:?} deadline",
            state.config.request_timeout
        ))
        .with_model(body.model.clone())
    })?;

    match outcome {
        GatewayResponse::Success(success) => {
            info!(
                request_id = %request_id,
                provider = %success.provider,
                model = %success.model_id,
                "Request served"
            );
            Ok(success_response(success))
        }
        GatewayResponse::Failure(failure) => {
            Err(ApiError::from(failure.error).with_model(failure.requested_model))
        }
    }
}

/// Resolve the caller's identity, honoring the bypass secret first.
///
/// A matching bypass token never reaches the delegate; everything else
/// goes through it and its verdict is surfaced unchanged.
async fn resolve_identity(
    state: &AppState,
    bearer: Option<&str>,
) -> Result<IdentityPayload, ApiError> {
    if let (Some(expected), Some(token)) = (&state.config.bypass_token, bearer) {
        if secrets_match(token, expected) {
            debug!("Bypass token accepted");
            return Ok(IdentityPayload::anonymous());
        }
    }

    state.auth.authorize(bearer).await.map_err(ApiError::from)
}

/// Build the streaming HTTP response for a winning attempt.
fn success_response(success: SuccessResponse) -> Response {
    let mut headers = success.headers.clone();

    // Hop-by-hop headers do not survive the re-streamed body.
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);

    for (name, value) in success.gateway_headers() {
        if let (Ok(name), Ok(value)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(&value),
        ) {
            headers.insert(name, value);
        }
    }

    let mut response = Response::new(Body::from_stream(success.body));
    *response.status_mut() = success.status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use http::HeaderMap;
    use pho_core::{ProviderId, MODEL_HEADER, PROVIDER_HEADER};

    #[test]
    fn success_response_carries_diagnostic_headers() {
        let mut upstream = HeaderMap::new();
        upstream.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/event-stream"),
        );
        upstream.insert(
            header::TRANSFER_ENCODING,
            HeaderValue::from_static("chunked"),
        );

        let response = success_response(SuccessResponse {
            provider: ProviderId::Cerebras,
            model_id: "llama3.1-8b".to_string(),
            status: StatusCode::OK,
            headers: upstream,
            body: Box::pin(stream::empty()),
        });

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get(PROVIDER_HEADER).unwrap(), "cerebras");
        assert_eq!(headers.get(MODEL_HEADER).unwrap(), "llama3.1-8b");
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/event-stream");
        assert!(headers.get(header::TRANSFER_ENCODING).is_none());
    }
}
