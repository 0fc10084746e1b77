//! Per-vendor payload sanitation.

use pho_core::ProviderId;
use pho_routing::ProviderCandidate;
use serde_json::Value;

/// Whether this candidate ultimately lands on a Gemini model.
fn targets_gemini(candidate: &ProviderCandidate) -> bool {
    candidate.provider == ProviderId::Vercelaigateway
        && candidate.model_id.starts_with("google/")
}

fn has_content(message: &Value) -> bool {
    match message.get("content") {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(parts)) => !parts.is_empty(),
        Some(Value::Null) | None => {
            // Assistant tool-call turns legitimately carry no content.
            message.get("tool_calls").is_some()
        }
        Some(_) => true,
    }
}

/// Adjust a wire payload for vendor quirks before dispatch.
///
/// Gemini rejects conversations containing empty-content messages, which
/// some clients emit as placeholders, so those are dropped for that
/// vendor only. Every other payload passes through untouched.
pub fn sanitize_payload(candidate: &ProviderCandidate, payload: &mut Value) {
    if !targets_gemini(candidate) {
        return;
    }

    if let Some(messages) = payload.get_mut("messages").and_then(Value::as_array_mut) {
        messages.retain(has_content);
    }
}
