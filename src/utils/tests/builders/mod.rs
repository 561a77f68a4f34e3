//! Test builder utilities, grouped by domain.

pub mod evm;
