//! Chain data source interfaces and implementations.
//!
//! Provides access to the chain data the pipeline runs on. Includes:
//!
//! - Generic block source trait
//! - HTTP client implementation (enriched-block API + JSON-RPC code lookup)
//! - Contract-recipient gate
//! - Error handling for source operations

mod client;
mod error;
mod filter;

pub use client::{BlockSourceClient, EvmClient};
pub use error::SourceError;
pub use filter::ContractFilter;
