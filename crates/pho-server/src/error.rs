//! API error payloads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pho_core::{GatewayError, ProviderId};
use serde::Serialize;
use serde_json::json;

/// Error surfaced at the HTTP boundary.
///
/// Serialized as `{"errorType": ..., "error": {"message": ...}}` with
/// optional `provider` and `model` diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status to respond with
    #[serde(skip)]
    pub status: StatusCode,
    /// Coarse classification name
    pub error_type: String,
    /// Human-readable message
    pub message: String,
    /// Provider the failure originated from, if any
    pub provider: Option<ProviderId>,
    /// Model the caller requested, if known
    pub model: Option<String>,
}

impl ApiError {
    /// Build an error with an explicit status and classification.
    #[must_use]
    pub fn new(status: StatusCode, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error_type: error_type.into(),
            message: message.into(),
            provider: None,
            model: None,
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", message)
    }

    /// 504 Gateway Timeout.
    #[must_use]
    pub fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, "Timeout", message)
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalServerError",
            message,
        )
    }

    /// Attach the requested model for diagnostics.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        let status = StatusCode::from_u16(error.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            error_type: error.kind().to_string(),
            message: error.to_string(),
            provider: error.provider(),
            model: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "errorType": self.error_type,
            "error": { "message": self.message },
            "provider": self.provider,
            "model": self.model,
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_map_to_http_statuses() {
        let err: ApiError = GatewayError::unauthorized("no").into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_type, "Unauthorized");

        let err: ApiError =
            GatewayError::from_upstream_status(ProviderId::Groq, 429, "quota").into();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.provider, Some(ProviderId::Groq));

        let err: ApiError = GatewayError::transport(ProviderId::Cerebras, "reset").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);

        let err: ApiError = GatewayError::internal("cfg").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn model_attaches_for_diagnostics() {
        let err = ApiError::internal("x").with_model("pho-fast");
        assert_eq!(err.model.as_deref(), Some("pho-fast"));
    }
}
