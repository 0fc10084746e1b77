//! Custom Axum extractors.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Request ID taken from common headers, or freshly generated.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-request-id")
            .or_else(|| parts.headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

        Ok(Self(id))
    }
}

/// Optional bearer token from the Authorization header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
            if let Ok(auth_str) = auth_header.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    if !token.is_empty() {
                        return Ok(Self(Some(token.to_string())));
                    }
                }
            }
        }
        Ok(Self(None))
    }
}

/// JSON body extractor with a structured 400 on parse failure.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> axum::extract::FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

        let value: T = serde_json::from_slice(&bytes).map_err(|e| {
            debug!(error = %e, "JSON parse error");
            ApiError::bad_request(format!("Invalid JSON: {e}"))
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn request_id_is_taken_from_header() {
        let req = Request::builder()
            .uri("/test")
            .header("x-request-id", "req-42")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id, "req-42");
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let req = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, ()) = req.into_parts();

        let RequestId(id) = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn bearer_token_extraction() {
        let req = Request::builder()
            .uri("/test")
            .header("authorization", "Bearer sk-abc")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();
        let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token.as_deref(), Some("sk-abc"));

        let req = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, ()) = req.into_parts();
        let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(token.is_none());
    }
}
