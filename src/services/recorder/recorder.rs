//! Construction and persistence of classified records.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

use crate::{
	models::{Category, ClassifiedRecord, RecordKind, TimestampSource, Transaction},
	services::recorder::{error::PersistenceError, store::DocumentStore},
	utils::metrics::{INGEST_FAILURES, RECORDS_INGESTED},
};

/// Builds normalized records and writes them to category partitions.
///
/// After each write the target partition is refreshed so subsequent reads
/// observe the record immediately. Failures carry partition, address, and
/// payload so the record can be replayed manually.
pub struct Recorder<S> {
	store: Arc<S>,
	chain: String,
	timestamp_source: TimestampSource,
}

impl<S: DocumentStore> Recorder<S> {
	/// Creates a new recorder writing to `store`.
	pub fn new(store: Arc<S>, chain: String, timestamp_source: TimestampSource) -> Self {
		Self {
			store,
			chain,
			timestamp_source,
		}
	}

	/// Chain identifier stamped on every record.
	pub fn chain(&self) -> &str {
		&self.chain
	}

	/// Builds the record for one classified item and persists it.
	///
	/// # Arguments
	/// * `category` - Terminal category; selects the partition
	/// * `tags` - Full tag set from the classifier
	/// * `kind` - Event (log) or function (call input) record
	/// * `name` - Decoded name, if any
	/// * `metadata` - Decoded fields, or an empty object
	/// * `raw_data` - The original, unmodified payload
	/// * `transaction` - The parent transaction
	/// * `block_timestamp` - The block's own timestamp, when the source supplied one
	#[allow(clippy::too_many_arguments)]
	pub async fn record(
		&self,
		category: Category,
		tags: Vec<String>,
		kind: RecordKind,
		name: Option<&str>,
		metadata: Value,
		raw_data: Value,
		transaction: &Transaction,
		block_timestamp: Option<u64>,
	) -> Result<(), PersistenceError> {
		let record = self.build_record(
			kind,
			name,
			tags,
			metadata,
			raw_data,
			transaction,
			block_timestamp,
		);
		let partition = category.partition();

		let document = serde_json::to_value(&record).map_err(|e| {
			PersistenceError::write_failed(
				"Failed to serialize record",
				Some(e.into()),
				Some(HashMap::from([(
					"partition".to_string(),
					partition.to_string(),
				)])),
			)
		})?;

		let error_metadata = || {
			Some(HashMap::from([
				("partition".to_string(), partition.to_string()),
				("address".to_string(), record.address.clone()),
				("payload".to_string(), document.to_string()),
			]))
		};

		tracing::debug!(partition, address = %record.address, "ingesting record");

		if let Err(e) = self.store.index(partition, &document).await {
			INGEST_FAILURES.with_label_values(&[partition]).inc();
			return Err(PersistenceError::write_failed(
				"Failed to write record",
				Some(e.into()),
				error_metadata(),
			));
		}

		if let Err(e) = self.store.refresh(partition).await {
			INGEST_FAILURES.with_label_values(&[partition]).inc();
			return Err(PersistenceError::refresh_failed(
				"Failed to refresh partition after write",
				Some(e.into()),
				error_metadata(),
			));
		}

		RECORDS_INGESTED.with_label_values(&[partition]).inc();
		Ok(())
	}

	fn build_record(
		&self,
		kind: RecordKind,
		name: Option<&str>,
		tags: Vec<String>,
		metadata: Value,
		raw_data: Value,
		transaction: &Transaction,
		block_timestamp: Option<u64>,
	) -> ClassifiedRecord {
		let address = transaction
			.to
			.map(|to| format!("{:?}", to))
			.unwrap_or_else(|| "unknown".to_string());

		ClassifiedRecord {
			kind,
			contract: address.clone(),
			from: format!("{:?}", transaction.from),
			name: name.unwrap_or("unknown").to_string(),
			status: transaction.status.into(),
			chain: self.chain.clone(),
			tags,
			block_number: transaction.block_number,
			timestamp: self.timestamp(block_timestamp),
			metadata,
			raw_data,
			address,
		}
	}

	fn timestamp(&self, block_timestamp: Option<u64>) -> DateTime<Utc> {
		match self.timestamp_source {
			TimestampSource::Processing => Utc::now(),
			TimestampSource::Block => block_timestamp
				.and_then(|seconds| DateTime::from_timestamp(seconds as i64, 0))
				.unwrap_or_else(Utc::now),
		}
	}
}
