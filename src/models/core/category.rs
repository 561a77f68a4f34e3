//! Classification categories and their store partitions.

use serde::{Deserialize, Serialize};

/// Terminal outcome category for a classified log or call input.
///
/// Every log of a contract-recipient transaction reaches exactly one of the
/// log categories; call inputs reach one of the transaction categories when a
/// usable ABI was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
	/// Log decoded against a known event signature
	Decoded,
	/// ABI unavailable (unverified source or failed fetch)
	NotDecoded,
	/// ABI available but the payload matched no signature
	NotParsed,
	/// Transaction carried zero logs
	Empty,
	/// Call input decoded against a known function signature
	DecodedTransactions,
	/// Call input matched no function signature
	NotDecodedTransactions,
}

impl Category {
	/// All categories, in a fixed order.
	pub const ALL: [Category; 6] = [
		Category::Decoded,
		Category::NotDecoded,
		Category::NotParsed,
		Category::Empty,
		Category::DecodedTransactions,
		Category::NotDecodedTransactions,
	];

	/// Name of the store partition records of this category are written to.
	pub fn partition(&self) -> &'static str {
		match self {
			Category::Decoded => "decoded-evm-logs",
			Category::NotDecoded => "not-decoded-evm-logs",
			Category::NotParsed => "not-parsed-evm-logs",
			Category::Empty => "empty-evm-logs",
			Category::DecodedTransactions => "decoded-evm-transactions",
			Category::NotDecodedTransactions => "not-decoded-evm-transactions",
		}
	}

	/// Category-specific tags, without the chain tag.
	pub fn base_tags(&self) -> &'static [&'static str] {
		match self {
			Category::Decoded => &["decoded"],
			Category::NotDecoded => &["not-decoded", "abi-not-available"],
			Category::NotParsed => &["not-decoded", "not-parsed"],
			Category::Empty => &["empty-log"],
			Category::DecodedTransactions => &["decoded"],
			Category::NotDecodedTransactions => &["not-decoded"],
		}
	}
}
