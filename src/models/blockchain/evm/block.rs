//! EVM block data structures.
//!
//! Note: These structures mirror the enriched-block payload returned by the
//! block data source: each transaction carries its receipt status and the
//! event logs it emitted, so a single fetch yields everything the pipeline
//! needs.

use ethers_core::types::{Address, Bytes, H256, U256};
use serde::{Deserialize, Serialize};

/// A block fetched from the chain data source.
///
/// Immutable once fetched; the pipeline never mutates block data.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Block {
	/// The block number
	pub number: u64,

	/// Timestamp when the block was produced (Unix timestamp in seconds).
	/// May be absent depending on the data source.
	pub timestamp: Option<u64>,

	/// Transactions in this block, with their logs attached
	#[serde(default)]
	pub transactions: Vec<Transaction>,
}

/// A transaction with its receipt status and emitted logs.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// Transaction hash
	pub hash: H256,

	/// Sender address
	pub from: Address,

	/// Recipient address. `None` for contract-creation transactions, which
	/// the pipeline treats as non-contract recipients.
	pub to: Option<Address>,

	/// Receipt status: `true` for success, `false` for failure
	pub status: bool,

	/// The block this transaction was included in
	pub block_number: u64,

	/// Call data
	pub input: Bytes,

	/// Transferred value in wei
	pub value: U256,

	/// Event logs emitted by this transaction
	#[serde(default)]
	pub logs: Vec<Log>,
}

/// A raw event log emitted by a transaction.
///
/// Opaque until decoded against the emitting contract's ABI; meaningful only
/// in the context of its parent transaction.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Log {
	/// Position of this log within its block
	pub log_index: u64,

	/// Indexed event topics; `topics[0]` is the event signature hash
	#[serde(default)]
	pub topics: Vec<H256>,

	/// Non-indexed event data
	#[serde(default)]
	pub data: Bytes,
}
