//! ABI registry interface and Etherscan-style implementation.
//!
//! The registry's "source not verified" sentinel wording is matched here and
//! nowhere else; downstream services branch on the closed [`RegistryAbi`] /
//! `AbiEntry` types instead of string equality.

use async_trait::async_trait;
use ethers_core::{abi::Abi, types::Address};
use serde::Deserialize;
use std::collections::HashMap;

use crate::services::abi::error::AbiError;

/// The literal text the registry returns for contracts without verified source.
pub const UNVERIFIED_SENTINEL: &str = "Contract source code not verified";

/// A successfully completed registry lookup.
#[derive(Debug, Clone)]
pub enum RegistryAbi {
	/// The contract's decoding interface
	Verified(Abi),
	/// The registry knows the address but its source is not verified
	Unverified,
}

/// Defines the interface to the external ABI registry
#[async_trait]
pub trait AbiRegistry: Send + Sync {
	/// Fetches the ABI for a contract address
	///
	/// # Arguments
	/// * `address` - The contract address to look up
	///
	/// # Returns
	/// * `Result<RegistryAbi, AbiError>` - The decoding interface, the
	///   unverified marker, or an error
	async fn fetch_abi(&self, address: &Address) -> Result<RegistryAbi, AbiError>;
}

/// Response envelope of the Etherscan `getabi` endpoint
#[derive(Debug, Deserialize)]
struct RegistryResponse {
	status: String,
	result: String,
}

/// Etherscan-style HTTP ABI registry client
#[derive(Debug, Clone)]
pub struct EtherscanClient {
	http: reqwest::Client,
	base_url: String,
	api_key: String,
}

impl EtherscanClient {
	/// Creates a new registry client
	///
	/// # Arguments
	/// * `base_url` - Registry API base URL (e.g. `https://api.etherscan.io/api`)
	/// * `api_key` - Registry API key
	pub fn new(base_url: String, api_key: String) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url,
			api_key,
		}
	}
}

#[async_trait]
impl AbiRegistry for EtherscanClient {
	async fn fetch_abi(&self, address: &Address) -> Result<RegistryAbi, AbiError> {
		let address_hex = format!("{:?}", address);
		let metadata = || {
			Some(HashMap::from([(
				"address".to_string(),
				address_hex.clone(),
			)]))
		};

		tracing::debug!(address = %address_hex, "fetching ABI from registry");

		let response = self
			.http
			.get(&self.base_url)
			.query(&[
				("module", "contract"),
				("action", "getabi"),
				("address", address_hex.as_str()),
				("apikey", self.api_key.as_str()),
			])
			.send()
			.await
			.map_err(|e| {
				AbiError::request_failed("ABI registry request failed", Some(e.into()), metadata())
			})?
			.error_for_status()
			.map_err(|e| {
				AbiError::request_failed(
					"ABI registry rejected the request",
					Some(e.into()),
					metadata(),
				)
			})?;

		let envelope: RegistryResponse = response.json().await.map_err(|e| {
			AbiError::response_parse_error(
				"ABI registry response was not valid JSON",
				Some(e.into()),
				metadata(),
			)
		})?;

		if envelope.result == UNVERIFIED_SENTINEL {
			return Ok(RegistryAbi::Unverified);
		}

		if envelope.status != "1" {
			return Err(AbiError::response_parse_error(
				format!("ABI registry returned an error result: {}", envelope.result),
				None,
				metadata(),
			));
		}

		let abi: Abi = serde_json::from_str(&envelope.result).map_err(|e| {
			AbiError::response_parse_error(
				"ABI registry result was not a valid interface",
				Some(e.into()),
				metadata(),
			)
		})?;

		Ok(RegistryAbi::Verified(abi))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registry_response_envelope_parses() {
		let raw = r#"{"status":"0","message":"NOTOK","result":"Contract source code not verified"}"#;
		let envelope: RegistryResponse = serde_json::from_str(raw).unwrap();
		assert_eq!(envelope.status, "0");
		assert_eq!(envelope.result, UNVERIFIED_SENTINEL);
	}

	#[test]
	fn test_verified_result_parses_as_abi() {
		let interface = r#"[{"type":"event","name":"Transfer","inputs":[],"anonymous":false}]"#;
		let abi: Abi = serde_json::from_str(interface).unwrap();
		assert!(abi.events.contains_key("Transfer"));
	}
}
