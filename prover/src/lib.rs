//! Proof orchestration for the tabular commitment pipeline.
//!
//! This crate contains:
//! - A FIFO queue serializing prove/verify jobs against the external
//!   tool's shared working directory (one job in flight, ever).
//! - The external tool boundary behind a trait so tests can fake it.
//! - Proof fingerprinting and simulated on-chain anchoring.

pub mod anchor;
pub mod errors;
pub mod orchestrator;
pub mod tool;
