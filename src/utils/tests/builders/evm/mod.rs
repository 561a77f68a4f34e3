//! Test helper utilities for EVM data structures.

pub mod block;
pub mod log;
pub mod transaction;
