//! Inbound request envelope.
//!
//! The gateway only interprets two fields of the caller's payload: `model`
//! (logical or concrete id) and the optional `provider` hint. Everything
//! else (messages, sampling parameters, tools) is carried opaquely and
//! forwarded verbatim to whichever backend is attempted.

use crate::types::ProviderId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chat-completion request as received at the gateway boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Requested model: a logical identifier or a concrete backend model id
    pub model: String,

    /// Optional provider hint for concrete model ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,

    /// Remaining payload, forwarded to the backend untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ChatRequest {
    /// Create a minimal request for a model, with an empty opaque payload.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            provider: None,
            payload: Map::new(),
        }
    }

    /// Whether the caller asked for a streaming response.
    #[must_use]
    pub fn wants_stream(&self) -> bool {
        self.payload
            .get("stream")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The opaque `messages` array, if present.
    #[must_use]
    pub fn messages(&self) -> Option<&Vec<Value>> {
        self.payload.get("messages").and_then(Value::as_array)
    }

    /// Build the wire payload for one attempt.
    ///
    /// Equal to the caller's payload except `model` is overwritten with the
    /// candidate's concrete model id. The `provider` hint is gateway-level
    /// routing metadata and is not forwarded.
    #[must_use]
    pub fn wire_payload(&self, model_id: &str) -> Value {
        let mut body = self.payload.clone();
        body.insert("model".to_string(), Value::String(model_id.to_string()));
        Value::Object(body)
    }
}
