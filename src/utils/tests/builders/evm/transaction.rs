//! Test helper utilities for creating EVM transactions.

use ethers_core::types::{Address, Bytes, H256, U256};

use crate::models::{Log, Transaction};

/// A builder for creating test transactions with default values.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
	transaction: Transaction,
}

impl TransactionBuilder {
	/// Creates a successful transaction with default fields.
	pub fn new() -> Self {
		Self {
			transaction: Transaction {
				status: true,
				..Default::default()
			},
		}
	}

	pub fn hash(mut self, hash: H256) -> Self {
		self.transaction.hash = hash;
		self
	}

	pub fn from(mut self, from: Address) -> Self {
		self.transaction.from = from;
		self
	}

	pub fn to(mut self, to: Address) -> Self {
		self.transaction.to = Some(to);
		self
	}

	/// Clears the recipient, marking this a contract-creation transaction.
	pub fn contract_creation(mut self) -> Self {
		self.transaction.to = None;
		self
	}

	pub fn status(mut self, success: bool) -> Self {
		self.transaction.status = success;
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.transaction.block_number = block_number;
		self
	}

	pub fn input(mut self, input: Bytes) -> Self {
		self.transaction.input = input;
		self
	}

	pub fn value(mut self, value: U256) -> Self {
		self.transaction.value = value;
		self
	}

	/// Appends an emitted log.
	pub fn log(mut self, log: Log) -> Self {
		self.transaction.logs.push(log);
		self
	}

	pub fn build(self) -> Transaction {
		self.transaction
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults() {
		let transaction = TransactionBuilder::new().build();
		assert!(transaction.status);
		assert!(transaction.to.is_none());
		assert!(transaction.logs.is_empty());
	}

	#[test]
	fn test_builder_sets_fields() {
		let to = Address::repeat_byte(0x42);
		let transaction = TransactionBuilder::new()
			.to(to)
			.block_number(7)
			.status(false)
			.log(Log::default())
			.build();

		assert_eq!(transaction.to, Some(to));
		assert_eq!(transaction.block_number, 7);
		assert!(!transaction.status);
		assert_eq!(transaction.logs.len(), 1);
	}
}
