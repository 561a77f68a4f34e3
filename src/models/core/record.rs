//! The persisted record shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a record captures a decoded event log or a decoded call input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
	/// An event log record
	Event,
	/// A call-input (function) record
	Function,
}

/// Receipt status carried on every persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	/// The transaction succeeded
	Success,
	/// The transaction reverted or otherwise failed
	Fail,
}

impl From<bool> for TransactionStatus {
	fn from(status: bool) -> Self {
		if status {
			TransactionStatus::Success
		} else {
			TransactionStatus::Fail
		}
	}
}

/// Which clock the persisted `timestamp` field is taken from.
///
/// The original service stamped records with processing wall-clock time; some
/// consumers may depend on that, so block time is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampSource {
	/// Record-creation wall-clock time (original behavior)
	#[default]
	Processing,
	/// The block's own timestamp, falling back to processing time when the
	/// source did not supply one
	Block,
}

impl std::str::FromStr for TimestampSource {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"processing" => Ok(TimestampSource::Processing),
			"block" => Ok(TimestampSource::Block),
			other => Err(format!(
				"unsupported timestamp source '{}' (expected 'processing' or 'block')",
				other
			)),
		}
	}
}

/// The unit of persistence: one classified log or call input.
///
/// Immutable after being handed to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedRecord {
	/// `event` or `function`
	#[serde(rename = "type")]
	pub kind: RecordKind,

	/// The recipient contract address, or `unknown`
	pub contract: String,

	/// The transaction sender
	pub from: String,

	/// The decoded event/function name, or `unknown`
	pub name: String,

	/// Receipt status of the parent transaction
	pub status: TransactionStatus,

	/// Chain identifier (e.g. `ethereum`)
	pub chain: String,

	/// Classification tags; the chain name is always included
	pub tags: Vec<String>,

	/// Block the parent transaction was included in
	pub block_number: u64,

	/// Record timestamp, per the configured `TimestampSource`
	pub timestamp: DateTime<Utc>,

	/// Decoded fields, or an empty object
	pub metadata: serde_json::Value,

	/// The original, unmodified log or transaction payload
	pub raw_data: serde_json::Value,

	/// The transaction's `to` address
	pub address: String,
}
