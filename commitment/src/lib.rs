//! Commitment pipeline for tabular financial data.
//!
//! This crate contains:
//! - Cell canonicalization into a deterministic string grid.
//! - Byte-to-field packing bounded by the BN254 scalar field.
//! - A sponge/Merkle hasher deriving per-tab roots and the file root.
//! - Witness assembly for the external proving tool.
//! - The persisted JSON formats shared with that tool.

pub mod canonical;
pub mod commit;
pub mod constants;
pub mod encode;
pub mod errors;
pub mod hash;
pub mod store;
pub mod witness;

pub use ark_bn254::Fr;
