//! Contract-recipient gate.

use ethers_core::types::Address;
use std::{collections::HashMap, sync::Arc};

use crate::services::blockchain::{client::BlockSourceClient, error::SourceError};

/// Tests whether a transaction's recipient is a contract.
///
/// An address is a contract iff code is deployed at it. Lookups are cheap and
/// happen once per transaction, so results are not cached. A failed lookup is
/// a [`SourceError`] for the caller to isolate; it is never reported as "not
/// a contract".
pub struct ContractFilter<C> {
	client: Arc<C>,
}

impl<C: BlockSourceClient> ContractFilter<C> {
	/// Creates a new filter over the given chain data source.
	pub fn new(client: Arc<C>) -> Self {
		Self { client }
	}

	/// Returns whether code is deployed at `address`.
	pub async fn is_contract(&self, address: &Address) -> Result<bool, SourceError> {
		let code = self.client.get_code(address).await.map_err(|e| {
			SourceError::code_lookup_error(
				format!("Failed to look up code for {:?}", address),
				Some(e.into()),
				Some(HashMap::from([(
					"address".to_string(),
					format!("{:?}", address),
				)])),
			)
		})?;

		Ok(!code.as_ref().is_empty())
	}
}
