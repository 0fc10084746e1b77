//! # Pho Failover
//!
//! Strictly sequential failover across a prioritized candidate list: the
//! first backend to answer with a success status wins, every failure is
//! classified, logged, and skipped.
//!
//! This crate provides:
//! - [`FailoverOrchestrator`], the per-request attempt loop
//! - Per-vendor payload sanitation applied just before dispatch

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod orchestrator;
mod sanitize;

// Re-export main types
pub use orchestrator::FailoverOrchestrator;
