//! # Pho Core
//!
//! Core types and error handling for the Pho inference gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The inbound chat request envelope
//! - Attempt and gateway response types with streaming bodies
//! - The gateway error taxonomy
//! - Provider identifiers and caller identity

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use request::ChatRequest;
pub use response::{
    AttemptOutcome, BackendResponse, BodyStream, FailureResponse, GatewayResponse,
    SuccessResponse, MODEL_HEADER, PROVIDER_HEADER,
};
pub use types::{IdentityPayload, ProviderId};
