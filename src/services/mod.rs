//! Service layer.
//!
//! Collaborator-facing services (blockchain source, ABI registry, document
//! store) expose traits with one HTTP-backed implementation each; the pure
//! stages (decoder, classifier) are plain functions; the pipeline module
//! orchestrates a block through all of them.

pub mod abi;
pub mod blockchain;
pub mod classifier;
pub mod decoder;
pub mod pipeline;
pub mod recorder;
