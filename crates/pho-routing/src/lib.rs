//! # Pho Routing
//!
//! Logical model resolution and provider remapping for the Pho inference
//! gateway.
//!
//! This crate provides:
//! - The logical model registry: stable product-facing ids expanding to
//!   ordered (provider, model) candidate lists
//! - The provider remapper: rewrites for disabled direct integrations and
//!   sunset model ids
//!
//! Both are pure lookups over immutable tables built once from
//! configuration; neither performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod registry;
pub mod remap;

// Re-export main types
pub use registry::{ModelRegistry, ProviderCandidate};
pub use remap::ProviderRemapper;
