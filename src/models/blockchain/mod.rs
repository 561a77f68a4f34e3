//! Blockchain-specific data structures.
//!
//! Currently EVM only; the wire shapes live under their chain family so a
//! second chain can be added without touching the pipeline's core types.

pub mod evm;
