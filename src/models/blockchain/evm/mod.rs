//! EVM data structures consumed by the pipeline.

mod abi;
mod block;

pub use abi::AbiEntry;
pub use block::{Block, Log, Transaction};
