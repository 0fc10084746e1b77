//! Integration tests for the Pho inference gateway
//!
//! End-to-end coverage of the full request flow: authorization, provider
//! remapping, candidate resolution, failover, and streaming pass-through,
//! with wiremock standing in for the backend providers.

pub mod helpers;

pub use helpers::*;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod gateway_tests;
