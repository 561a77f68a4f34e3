//! Core chain data source interface and its HTTP implementation.
//!
//! The pipeline consumes blocks through the [`BlockSourceClient`] trait so
//! tests can substitute a mock; production uses [`EvmClient`], which pairs an
//! enriched-block REST API (blocks with receipt status and logs attached)
//! with a plain JSON-RPC endpoint for contract-code lookups.

use anyhow::Context;
use async_trait::async_trait;
use ethers_core::types::{Address, Bytes};
use serde::Deserialize;
use serde_json::json;

use crate::models::Block;

/// Defines the core interface to the chain data source
///
/// Implementations provide the block payloads and contract-code lookups the
/// pipeline runs on.
#[async_trait]
pub trait BlockSourceClient: Send + Sync {
	/// Retrieves the latest block number from the data source
	///
	/// # Returns
	/// * `Result<u64, anyhow::Error>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error>;

	/// Retrieves a single block, with transactions and their logs attached
	///
	/// # Arguments
	/// * `number` - The block number to fetch
	///
	/// # Returns
	/// * `Result<Block, anyhow::Error>` - The block or an error
	async fn get_block(&self, number: u64) -> Result<Block, anyhow::Error>;

	/// Retrieves the code deployed at an address
	///
	/// Returns empty bytes for externally owned accounts.
	///
	/// # Arguments
	/// * `address` - The address to inspect
	///
	/// # Returns
	/// * `Result<Bytes, anyhow::Error>` - The code bytes (possibly empty) or an error
	async fn get_code(&self, address: &Address) -> Result<Bytes, anyhow::Error>;
}

/// JSON-RPC response envelope for `eth_getCode`
#[derive(Debug, Deserialize)]
struct RpcResponse {
	result: Option<Bytes>,
	error: Option<serde_json::Value>,
}

/// HTTP-backed chain data source client
///
/// Fetches enriched blocks from a REST block API and contract code over
/// JSON-RPC. Cheap to clone; the underlying `reqwest::Client` pools
/// connections.
#[derive(Debug, Clone)]
pub struct EvmClient {
	http: reqwest::Client,
	block_api_url: String,
	block_api_key: Option<String>,
	rpc_url: String,
}

impl EvmClient {
	/// Creates a new client
	///
	/// # Arguments
	/// * `block_api_url` - Base URL of the enriched-block API
	/// * `block_api_key` - Optional API key sent as the `x-api-key` header
	/// * `rpc_url` - JSON-RPC endpoint used for `eth_getCode`
	pub fn new(block_api_url: String, block_api_key: Option<String>, rpc_url: String) -> Self {
		Self {
			http: reqwest::Client::new(),
			block_api_url: block_api_url.trim_end_matches('/').to_string(),
			block_api_key,
			rpc_url,
		}
	}

	fn block_api_request(&self, path: &str) -> reqwest::RequestBuilder {
		let mut request = self
			.http
			.get(format!("{}/{}", self.block_api_url, path));
		if let Some(key) = &self.block_api_key {
			request = request.header("x-api-key", key);
		}
		request
	}
}

#[async_trait]
impl BlockSourceClient for EvmClient {
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error> {
		let response = self
			.block_api_request("current")
			.send()
			.await
			.with_context(|| "Failed to request latest block number")?
			.error_for_status()
			.with_context(|| "Block API rejected latest block number request")?;

		response
			.json::<u64>()
			.await
			.with_context(|| "Failed to parse latest block number")
	}

	async fn get_block(&self, number: u64) -> Result<Block, anyhow::Error> {
		let response = self
			.block_api_request(&number.to_string())
			.send()
			.await
			.with_context(|| format!("Failed to request block {}", number))?
			.error_for_status()
			.with_context(|| format!("Block API rejected request for block {}", number))?;

		response
			.json::<Block>()
			.await
			.with_context(|| format!("Failed to parse block {}", number))
	}

	async fn get_code(&self, address: &Address) -> Result<Bytes, anyhow::Error> {
		let payload = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_getCode",
			"params": [format!("{:?}", address), "latest"],
		});

		let response: RpcResponse = self
			.http
			.post(&self.rpc_url)
			.json(&payload)
			.send()
			.await
			.with_context(|| format!("Failed to request code for {:?}", address))?
			.error_for_status()
			.with_context(|| format!("RPC rejected eth_getCode for {:?}", address))?
			.json()
			.await
			.with_context(|| format!("Failed to parse eth_getCode response for {:?}", address))?;

		if let Some(error) = response.error {
			anyhow::bail!("eth_getCode returned an error: {}", error);
		}

		response
			.result
			.ok_or_else(|| anyhow::anyhow!("eth_getCode response carried no result"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_block_api_url_is_normalized() {
		let client = EvmClient::new(
			"https://api.example.com/ethereum/block/".to_string(),
			None,
			"https://rpc.example.com".to_string(),
		);
		assert_eq!(client.block_api_url, "https://api.example.com/ethereum/block");
	}

	#[test]
	fn test_rpc_response_parses_code() {
		let raw = r#"{"jsonrpc":"2.0","id":1,"result":"0x6080"}"#;
		let response: RpcResponse = serde_json::from_str(raw).unwrap();
		assert_eq!(response.result.unwrap().to_vec(), vec![0x60, 0x80]);
		assert!(response.error.is_none());
	}

	#[test]
	fn test_rpc_response_parses_error() {
		let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"boom"}}"#;
		let response: RpcResponse = serde_json::from_str(raw).unwrap();
		assert!(response.result.is_none());
		assert!(response.error.is_some());
	}
}
