//! Application configuration loaded from the environment.
//!
//! The process reads its configuration once at startup (after `dotenv` has
//! populated the environment) and validates it into an [`AppConfig`]. All
//! durations are given in milliseconds.

use std::time::Duration;
use thiserror::Error;

use crate::models::TimestampSource;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A required environment variable is not set
	#[error("missing required environment variable {0}")]
	MissingVar(String),

	/// An environment variable is set but could not be parsed
	#[error("invalid value for {name}: {reason}")]
	InvalidVar { name: String, reason: String },
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
	/// Chain identifier included in every record and tag set
	pub chain: String,
	/// Base URL of the enriched-block API
	pub block_api_url: String,
	/// Optional API key sent with block API requests
	pub block_api_key: Option<String>,
	/// JSON-RPC endpoint used for contract-code lookups
	pub rpc_url: String,
	/// Base URL of the ABI registry
	pub registry_url: String,
	/// ABI registry API key
	pub registry_api_key: String,
	/// Base URL of the document store
	pub store_url: String,
	/// Optional basic-auth credentials for the document store
	pub store_username: Option<String>,
	pub store_password: Option<String>,
	/// Wait after a new-block notification before fetching the block
	pub settling_delay: Duration,
	/// Minimum spacing between outbound ABI registry requests
	pub abi_request_interval: Duration,
	/// Cadence of latest-block polling in watch mode
	pub poll_interval: Duration,
	/// Capacity of the pending-block queue in watch mode
	pub queue_capacity: usize,
	/// Transaction fan-out width within one block
	pub max_concurrent_transactions: usize,
	/// Log fan-out width within one transaction
	pub max_concurrent_logs: usize,
	/// Which clock the persisted `timestamp` field is taken from
	pub timestamp_source: TimestampSource,
}

impl AppConfig {
	/// Loads and validates the configuration from the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Ok(Self {
			chain: optional_var("CHAIN_SLUG").unwrap_or_else(|| "ethereum".to_string()),
			block_api_url: require_var("BLOCK_API_URL")?,
			block_api_key: optional_var("BLOCK_API_KEY"),
			rpc_url: require_var("RPC_URL")?,
			registry_url: optional_var("ABI_REGISTRY_URL")
				.unwrap_or_else(|| "https://api.etherscan.io/api".to_string()),
			registry_api_key: require_var("ABI_REGISTRY_API_KEY")?,
			store_url: require_var("STORE_URL")?,
			store_username: optional_var("STORE_USERNAME"),
			store_password: optional_var("STORE_PASSWORD"),
			settling_delay: Duration::from_millis(parse_var("SETTLING_DELAY_MS", 180_000)?),
			abi_request_interval: Duration::from_millis(parse_var(
				"ABI_REQUEST_INTERVAL_MS",
				2_000,
			)?),
			poll_interval: Duration::from_millis(parse_var("POLL_INTERVAL_MS", 10_000)?),
			queue_capacity: parse_var("BLOCK_QUEUE_CAPACITY", 64)?,
			max_concurrent_transactions: parse_var("MAX_CONCURRENT_TRANSACTIONS", 32)?,
			max_concurrent_logs: parse_var("MAX_CONCURRENT_LOGS", 16)?,
			timestamp_source: parse_timestamp_source()?,
		})
	}
}

fn optional_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn require_var(name: &str) -> Result<String, ConfigError> {
	optional_var(name).ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
	T::Err: std::fmt::Display,
{
	match optional_var(name) {
		Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidVar {
			name: name.to_string(),
			reason: format!("{}", e),
		}),
		None => Ok(default),
	}
}

fn parse_timestamp_source() -> Result<TimestampSource, ConfigError> {
	match optional_var("TIMESTAMP_SOURCE") {
		Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidVar {
			name: "TIMESTAMP_SOURCE".to_string(),
			reason,
		}),
		None => Ok(TimestampSource::default()),
	}
}
