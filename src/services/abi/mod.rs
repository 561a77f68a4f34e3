//! ABI registry access and per-run resolution.
//!
//! Provides the registry client, the outbound rate limiter, and the per-run
//! resolver the pipeline uses. Includes:
//!
//! - ABI registry trait and Etherscan-style HTTP client
//! - Fixed-cadence rate limiter shared by all callers
//! - Per-run resolver with single-flight memoization
//! - Error handling for registry operations

mod error;
mod limiter;
mod registry;
mod resolver;

pub use error::AbiError;
pub use limiter::FixedCadence;
pub use registry::{AbiRegistry, EtherscanClient, RegistryAbi, UNVERIFIED_SENTINEL};
pub use resolver::AbiResolver;
