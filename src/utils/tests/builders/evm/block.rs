//! Test helper utilities for creating EVM blocks.

use crate::models::{Block, Transaction};

/// A builder for creating test blocks with default values.
#[derive(Debug, Default)]
pub struct BlockBuilder {
	block: Block,
}

impl BlockBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn number(mut self, number: u64) -> Self {
		self.block.number = number;
		self
	}

	pub fn timestamp(mut self, timestamp: u64) -> Self {
		self.block.timestamp = Some(timestamp);
		self
	}

	/// Appends a transaction, stamping it with the block's number.
	pub fn transaction(mut self, transaction: Transaction) -> Self {
		self.block.transactions.push(Transaction {
			block_number: self.block.number,
			..transaction
		});
		self
	}

	pub fn build(self) -> Block {
		self.block
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::tests::builders::evm::transaction::TransactionBuilder;

	#[test]
	fn test_builder_defaults() {
		let block = BlockBuilder::new().build();
		assert_eq!(block.number, 0);
		assert!(block.timestamp.is_none());
		assert!(block.transactions.is_empty());
	}

	#[test]
	fn test_transactions_inherit_block_number() {
		let block = BlockBuilder::new()
			.number(100)
			.transaction(TransactionBuilder::new().build())
			.build();

		assert_eq!(block.transactions[0].block_number, 100);
	}
}
