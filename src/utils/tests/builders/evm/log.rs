//! Test helper utilities for creating EVM event logs.

use ethers_core::types::{Bytes, H256};

use crate::models::Log;

/// A builder for creating test logs with default values.
#[derive(Debug, Default)]
pub struct LogBuilder {
	log: Log,
}

impl LogBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn log_index(mut self, log_index: u64) -> Self {
		self.log.log_index = log_index;
		self
	}

	/// Appends a topic; the first one is the event signature hash.
	pub fn topic(mut self, topic: H256) -> Self {
		self.log.topics.push(topic);
		self
	}

	pub fn data(mut self, data: Bytes) -> Self {
		self.log.data = data;
		self
	}

	pub fn build(self) -> Log {
		self.log
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_accumulates_topics() {
		let log = LogBuilder::new()
			.log_index(3)
			.topic(H256::repeat_byte(0x01))
			.topic(H256::repeat_byte(0x02))
			.build();

		assert_eq!(log.log_index, 3);
		assert_eq!(log.topics.len(), 2);
	}
}
