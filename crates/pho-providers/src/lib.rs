//! # Pho Providers
//!
//! The gateway's boundary to its external collaborators: credential
//! resolution and backend client construction.
//!
//! This crate provides:
//! - The [`CredentialResolver`] contract plus the environment/config-backed
//!   implementation
//! - The [`BackendClient`] / [`BackendClientFactory`] contracts plus the
//!   reqwest-backed OpenAI-wire implementation with streaming pass-through
//!
//! The failover orchestrator consumes these traits; tests substitute
//! scripted implementations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod credentials;

// Re-export main types
pub use client::{BackendClient, BackendClientFactory, HttpBackendClient, HttpClientFactory};
pub use credentials::{CredentialResolver, EnvCredentialResolver, ProviderCredentials};
