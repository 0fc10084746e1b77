//! Authorization and bypass-path tests.

use crate::helpers::*;
use async_trait::async_trait;
use pho_core::{GatewayError, IdentityPayload, ProviderId};
use pho_server::{AppState, AuthDelegate};
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Delegate that counts how often it is consulted.
struct CountingAuth {
    calls: AtomicUsize,
    verdict: Result<(), ()>,
}

impl CountingAuth {
    fn allowing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            verdict: Ok(()),
        })
    }

    fn denying() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            verdict: Err(()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthDelegate for CountingAuth {
    async fn authorize(&self, _bearer: Option<&str>) -> Result<IdentityPayload, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.verdict {
            Ok(()) => Ok(IdentityPayload::for_user("counted")),
            Err(()) => Err(GatewayError::unauthorized("denied by delegate")),
        }
    }
}

fn ok_backend() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"choices": []}))
}

#[tokio::test]
async fn configured_api_key_gates_the_chat_endpoint() {
    init_tracing();

    let groq = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_backend())
        .mount(&groq)
        .await;

    let mut config = mock_config(&[(ProviderId::Groq, &groq)]);
    config.api_keys = vec![SecretString::new("sk-caller".to_string())];
    let server = TestServer::with_config(config).await;

    let body = json!({"model": "pho-fast", "messages": []});

    // No token
    let response = server.post_json("/gateway/chat", &body).await;
    let response = assert_status(response, 401).await;
    let payload = TestServer::json_body(response).await;
    assert_eq!(payload["errorType"], "Unauthorized");

    // Wrong token
    let response = server
        .post_json_bearer("/gateway/chat", &body, "sk-wrong")
        .await;
    assert_status(response, 401).await;

    // Correct token
    let response = server
        .post_json_bearer("/gateway/chat", &body, "sk-caller")
        .await;
    assert_status(response, 200).await;
}

#[tokio::test]
async fn bypass_token_never_consults_the_delegate() {
    init_tracing();

    let groq = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_backend())
        .mount(&groq)
        .await;

    let auth = CountingAuth::denying();
    let mut config = mock_config(&[(ProviderId::Groq, &groq)]);
    config.bypass_token = Some(SecretString::new("labs-secret".to_string()));

    let server = TestServer::with_state(
        AppState::builder(config).auth(Arc::clone(&auth) as Arc<dyn AuthDelegate>),
    )
    .await;

    let response = server
        .post_json_bearer(
            "/gateway/chat",
            &json!({"model": "pho-fast", "messages": []}),
            "labs-secret",
        )
        .await;

    assert_status(response, 200).await;
    assert_eq!(auth.calls(), 0);
}

#[tokio::test]
async fn non_matching_token_falls_through_to_the_delegate() {
    init_tracing();

    let groq = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_backend())
        .mount(&groq)
        .await;

    let auth = CountingAuth::allowing();
    let mut config = mock_config(&[(ProviderId::Groq, &groq)]);
    config.bypass_token = Some(SecretString::new("labs-secret".to_string()));

    let server = TestServer::with_state(
        AppState::builder(config).auth(Arc::clone(&auth) as Arc<dyn AuthDelegate>),
    )
    .await;

    let response = server
        .post_json_bearer(
            "/gateway/chat",
            &json!({"model": "pho-fast", "messages": []}),
            "some-user-token",
        )
        .await;

    assert_status(response, 200).await;
    assert_eq!(auth.calls(), 1);
}

#[tokio::test]
async fn delegate_error_surfaces_unchanged() {
    init_tracing();

    let auth = CountingAuth::denying();
    let config = mock_config(&[]);

    let server = TestServer::with_state(
        AppState::builder(config).auth(Arc::clone(&auth) as Arc<dyn AuthDelegate>),
    )
    .await;

    let response = server
        .post_json("/gateway/chat", &json!({"model": "pho-fast", "messages": []}))
        .await;

    let response = assert_status(response, 401).await;
    let payload = TestServer::json_body(response).await;
    assert!(payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("denied by delegate"));
    assert_eq!(auth.calls(), 1);
}
