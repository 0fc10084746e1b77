//! # Pho Server
//!
//! HTTP surface of the Pho inference gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server with graceful shutdown
//! - The gateway chat entry point with identity resolution, remap,
//!   candidate expansion, and deadline enforcement
//! - The authorization delegate contract and the bundled key-list
//!   implementation with a bypass secret path

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use auth::{AuthDelegate, StaticKeyAuth};
pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ServerError};
pub use state::{AppState, AppStateBuilder};
