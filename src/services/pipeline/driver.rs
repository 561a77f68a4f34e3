//! Per-block pipeline orchestration.
//!
//! The driver owns all failure-isolation boundaries: a source error aborts one
//! transaction, a persistence error loses one record, and neither ever aborts
//! siblings or the block. Records for distinct logs are independent; within
//! one log the stages run strictly in sequence.

use futures::{stream, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
	models::{AbiEntry, Block, Category, Log, RecordKind, Transaction},
	services::{
		abi::{AbiRegistry, AbiResolver, FixedCadence},
		blockchain::{BlockSourceClient, ContractFilter},
		classifier,
		decoder::{self, DecodeOutcome},
		recorder::{DocumentStore, PersistenceError, Recorder},
	},
	utils::{
		logging::TraceableError,
		metrics::{BLOCKS_PROCESSED, TRANSACTION_FAILURES},
	},
};

/// Summary of one block run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BlockReport {
	/// The block that was processed
	pub block_number: u64,
	/// Transactions seen in the block, whether or not they produced records
	pub transactions_seen: usize,
	/// Records successfully written to their partitions
	pub records_written: usize,
	/// Records lost to write or refresh failures
	pub record_failures: usize,
	/// Transactions aborted by a source error before classification
	pub transaction_failures: usize,
}

#[derive(Default)]
struct TransactionOutcome {
	records_written: usize,
	record_failures: usize,
	aborted: bool,
}

impl TransactionOutcome {
	fn tally(&mut self, result: Result<(), PersistenceError>) {
		match result {
			Ok(()) => self.records_written += 1,
			// Already logged with partition/address/payload at creation.
			Err(_) => self.record_failures += 1,
		}
	}
}

/// Drives one block through filter, resolution, decode, classification, and
/// persistence.
pub struct PipelineDriver<C, R, S> {
	filter: ContractFilter<C>,
	registry: Arc<R>,
	limiter: Arc<FixedCadence>,
	recorder: Arc<Recorder<S>>,
	max_concurrent_transactions: usize,
	max_concurrent_logs: usize,
}

impl<C, R, S> PipelineDriver<C, R, S>
where
	C: BlockSourceClient,
	R: AbiRegistry,
	S: DocumentStore,
{
	/// Creates a driver over the given collaborators.
	///
	/// The rate limiter is shared across block runs so registry cadence holds
	/// globally; the ABI cache is per run.
	pub fn new(
		client: Arc<C>,
		registry: Arc<R>,
		limiter: Arc<FixedCadence>,
		recorder: Arc<Recorder<S>>,
		max_concurrent_transactions: usize,
		max_concurrent_logs: usize,
	) -> Self {
		Self {
			filter: ContractFilter::new(client),
			registry,
			limiter,
			recorder,
			max_concurrent_transactions: max_concurrent_transactions.max(1),
			max_concurrent_logs: max_concurrent_logs.max(1),
		}
	}

	/// Processes every transaction in `block` and returns a summary.
	///
	/// A fresh ABI cache is created for the run, so each distinct contract
	/// address triggers at most one registry fetch per block.
	#[tracing::instrument(skip_all, fields(block_number = block.number))]
	pub async fn process_block(&self, block: &Block) -> BlockReport {
		let resolver = AbiResolver::new(self.registry.clone(), self.limiter.clone());
		let resolver = &resolver;

		// Building the (lazy) futures up front keeps the stream free of
		// borrowing closures; rustc otherwise rejects the spawned watcher task
		// with "implementation of `FnOnce` is not general enough"
		// (higher-ranked lifetime limitation).
		let futures: Vec<_> = block
			.transactions
			.iter()
			.map(|transaction| self.process_transaction(transaction, resolver, block.timestamp))
			.collect();
		let outcomes: Vec<TransactionOutcome> = stream::iter(futures)
			.buffer_unordered(self.max_concurrent_transactions)
			.collect()
			.await;

		BLOCKS_PROCESSED.inc();

		let mut report = BlockReport {
			block_number: block.number,
			transactions_seen: block.transactions.len(),
			..Default::default()
		};
		for outcome in outcomes {
			report.records_written += outcome.records_written;
			report.record_failures += outcome.record_failures;
			report.transaction_failures += usize::from(outcome.aborted);
		}

		tracing::info!(
			block_number = block.number,
			transactions = report.transactions_seen,
			records = report.records_written,
			record_failures = report.record_failures,
			transaction_failures = report.transaction_failures,
			"block processed"
		);
		report
	}

	async fn process_transaction(
		&self,
		transaction: &Transaction,
		resolver: &AbiResolver<R>,
		block_timestamp: Option<u64>,
	) -> TransactionOutcome {
		let mut outcome = TransactionOutcome::default();

		// Contract creations carry no recipient to test.
		let Some(to) = transaction.to else {
			tracing::debug!(hash = ?transaction.hash, "skipping contract creation");
			return outcome;
		};

		match self.filter.is_contract(&to).await {
			Ok(true) => {}
			Ok(false) => {
				tracing::debug!(hash = ?transaction.hash, "recipient is not a contract");
				return outcome;
			}
			Err(e) => {
				TRANSACTION_FAILURES.inc();
				tracing::error!(
					hash = ?transaction.hash,
					trace_id = %e.trace_id(),
					"transaction aborted: {}",
					e
				);
				outcome.aborted = true;
				return outcome;
			}
		}

		let entry = resolver.resolve(to).await;

		if transaction.logs.is_empty() {
			let tags = classifier::tags_for(Category::Empty, self.recorder.chain());
			let result = self
				.recorder
				.record(
					Category::Empty,
					tags,
					RecordKind::Event,
					None,
					json!({}),
					json!({}),
					transaction,
					block_timestamp,
				)
				.await;
			outcome.tally(result);
		} else {
			let futures: Vec<_> = transaction
				.logs
				.iter()
				.map(|log| self.process_log(log, &entry, transaction, block_timestamp))
				.collect();
			let results: Vec<Result<(), PersistenceError>> = stream::iter(futures)
				.buffer_unordered(self.max_concurrent_logs)
				.collect()
				.await;
			for result in results {
				outcome.tally(result);
			}
		}

		// A call record is only attempted once a usable interface exists.
		if entry.is_usable() {
			let decoded = decoder::decode_call(&transaction.input, &entry);
			let (category, tags) = classifier::classify_call(&decoded, self.recorder.chain());
			let result = self
				.recorder
				.record(
					category,
					tags,
					RecordKind::Function,
					decoded.name(),
					decoded_args(&decoded),
					json!({ "input": transaction.input, "value": transaction.value }),
					transaction,
					block_timestamp,
				)
				.await;
			outcome.tally(result);
		}

		outcome
	}

	async fn process_log(
		&self,
		log: &Log,
		entry: &AbiEntry,
		transaction: &Transaction,
		block_timestamp: Option<u64>,
	) -> Result<(), PersistenceError> {
		let decoded = decoder::decode_log(log, entry);
		let (category, tags) = classifier::classify_log(&decoded, true, self.recorder.chain());
		let raw_data = serde_json::to_value(log).unwrap_or_else(|_| json!({}));

		self.recorder
			.record(
				category,
				tags,
				RecordKind::Event,
				decoded.name(),
				decoded_args(&decoded),
				raw_data,
				transaction,
				block_timestamp,
			)
			.await
	}
}

fn decoded_args(outcome: &DecodeOutcome) -> Value {
	match outcome {
		DecodeOutcome::Decoded { args, .. } => Value::Object(args.clone()),
		_ => json!({}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		models::TimestampSource,
		services::abi::{AbiError, RegistryAbi},
		utils::tests::builders::evm::{
			block::BlockBuilder, log::LogBuilder, transaction::TransactionBuilder,
		},
	};
	use async_trait::async_trait;
	use ethers_core::{
		abi::Abi,
		types::{Address, Bytes, H256, U256},
	};
	use std::{
		collections::{HashMap, HashSet},
		time::Duration,
	};
	use tokio::sync::Mutex;

	struct StubChain {
		contracts: HashSet<Address>,
		failing: HashSet<Address>,
	}

	#[async_trait]
	impl BlockSourceClient for StubChain {
		async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error> {
			Ok(0)
		}

		async fn get_block(&self, _number: u64) -> Result<Block, anyhow::Error> {
			Ok(Block::default())
		}

		async fn get_code(&self, address: &Address) -> Result<Bytes, anyhow::Error> {
			if self.failing.contains(address) {
				anyhow::bail!("rpc unavailable");
			}
			if self.contracts.contains(address) {
				Ok(Bytes::from(vec![0x60, 0x80]))
			} else {
				Ok(Bytes::default())
			}
		}
	}

	struct StubRegistry {
		response: RegistryAbi,
	}

	#[async_trait]
	impl AbiRegistry for StubRegistry {
		async fn fetch_abi(&self, _address: &Address) -> Result<RegistryAbi, AbiError> {
			Ok(self.response.clone())
		}
	}

	#[derive(Default)]
	struct CaptureStore {
		documents: Mutex<Vec<(String, Value)>>,
	}

	#[async_trait]
	impl DocumentStore for CaptureStore {
		async fn index(&self, partition: &str, document: &Value) -> Result<(), anyhow::Error> {
			self.documents
				.lock()
				.await
				.push((partition.to_string(), document.clone()));
			Ok(())
		}

		async fn refresh(&self, _partition: &str) -> Result<(), anyhow::Error> {
			Ok(())
		}
	}

	const ERC20_ABI: &str = r#"[
		{
			"anonymous": false,
			"inputs": [
				{"indexed": true, "name": "from", "type": "address"},
				{"indexed": true, "name": "to", "type": "address"},
				{"indexed": false, "name": "value", "type": "uint256"}
			],
			"name": "Transfer",
			"type": "event"
		}
	]"#;

	fn transfer_log() -> Log {
		let mut value = [0u8; 32];
		U256::from(1_000u64).to_big_endian(&mut value);

		LogBuilder::new()
			.topic(
				// keccak256("Transfer(address,address,uint256)")
				"0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
					.parse()
					.unwrap(),
			)
			.topic(H256::from(Address::repeat_byte(0x11)))
			.topic(H256::from(Address::repeat_byte(0x22)))
			.data(Bytes::from(value.to_vec()))
			.build()
	}

	fn driver(
		contracts: &[Address],
		failing: &[Address],
		registry: RegistryAbi,
	) -> (
		PipelineDriver<StubChain, StubRegistry, CaptureStore>,
		Arc<CaptureStore>,
	) {
		let store = Arc::new(CaptureStore::default());
		let driver = PipelineDriver::new(
			Arc::new(StubChain {
				contracts: contracts.iter().copied().collect(),
				failing: failing.iter().copied().collect(),
			}),
			Arc::new(StubRegistry { response: registry }),
			Arc::new(FixedCadence::new(Duration::from_millis(0))),
			Arc::new(Recorder::new(
				store.clone(),
				"ethereum".to_string(),
				TimestampSource::Processing,
			)),
			4,
			4,
		);
		(driver, store)
	}

	async fn partition_counts(store: &CaptureStore) -> HashMap<String, usize> {
		let mut counts = HashMap::new();
		for (partition, _) in store.documents.lock().await.iter() {
			*counts.entry(partition.clone()).or_insert(0) += 1;
		}
		counts
	}

	#[tokio::test]
	async fn test_mixed_block_routes_every_log_to_a_partition() {
		let contract = Address::repeat_byte(0xc0);
		let eoa = Address::repeat_byte(0xe0);
		let abi: Abi = serde_json::from_str(ERC20_ABI).unwrap();
		let (driver, store) = driver(&[contract], &[], RegistryAbi::Verified(abi));

		let unknown_log = LogBuilder::new()
			.log_index(1)
			.topic(H256::repeat_byte(0x99))
			.build();
		let block = BlockBuilder::new()
			.number(10)
			.transaction(
				TransactionBuilder::new()
					.to(contract)
					.log(transfer_log())
					.log(unknown_log)
					.build(),
			)
			.transaction(TransactionBuilder::new().to(eoa).build())
			.transaction(TransactionBuilder::new().contract_creation().build())
			.transaction(TransactionBuilder::new().to(contract).build())
			.build();

		let report = driver.process_block(&block).await;

		assert_eq!(report.block_number, 10);
		assert_eq!(report.transactions_seen, 4);
		assert_eq!(report.transaction_failures, 0);
		assert_eq!(report.record_failures, 0);

		let counts = partition_counts(&store).await;
		assert_eq!(counts.get("decoded-evm-logs"), Some(&1));
		assert_eq!(counts.get("not-parsed-evm-logs"), Some(&1));
		assert_eq!(counts.get("empty-evm-logs"), Some(&1));
		// Both contract transactions have empty call input.
		assert_eq!(counts.get("not-decoded-evm-transactions"), Some(&2));
		assert_eq!(report.records_written, 5);
	}

	#[tokio::test]
	async fn test_code_lookup_failure_does_not_abort_siblings() {
		let good = Address::repeat_byte(0xc0);
		let bad = Address::repeat_byte(0xba);
		let (driver, store) = driver(&[good], &[bad], RegistryAbi::Unverified);

		let block = BlockBuilder::new()
			.number(11)
			.transaction(TransactionBuilder::new().to(bad).log(transfer_log()).build())
			.transaction(
				TransactionBuilder::new()
					.to(good)
					.log(transfer_log())
					.build(),
			)
			.build();

		let report = driver.process_block(&block).await;

		assert_eq!(report.transaction_failures, 1);
		assert_eq!(report.records_written, 1);

		let counts = partition_counts(&store).await;
		assert_eq!(counts.get("not-decoded-evm-logs"), Some(&1));
	}

	#[tokio::test]
	async fn test_unverified_contract_gets_no_call_record() {
		let contract = Address::repeat_byte(0xc0);
		let (driver, store) = driver(&[contract], &[], RegistryAbi::Unverified);

		let block = BlockBuilder::new()
			.number(12)
			.transaction(
				TransactionBuilder::new()
					.to(contract)
					.input(Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]))
					.log(transfer_log())
					.build(),
			)
			.build();

		let report = driver.process_block(&block).await;
		assert_eq!(report.records_written, 1);

		let counts = partition_counts(&store).await;
		assert_eq!(counts.get("not-decoded-evm-logs"), Some(&1));
		assert!(!counts.contains_key("decoded-evm-transactions"));
		assert!(!counts.contains_key("not-decoded-evm-transactions"));
	}

	#[tokio::test]
	async fn test_non_contract_recipients_produce_no_records() {
		let eoa = Address::repeat_byte(0xe0);
		let (driver, store) = driver(&[], &[], RegistryAbi::Unverified);

		let block = BlockBuilder::new()
			.number(13)
			.transaction(TransactionBuilder::new().to(eoa).log(transfer_log()).build())
			.build();

		let report = driver.process_block(&block).await;
		assert_eq!(report.records_written, 0);
		assert!(store.documents.lock().await.is_empty());
	}
}
